use crate::math::{Point, Real, Uv, Vector};
use crate::shape::Mesh;
use core::f32::consts::{FRAC_PI_2, PI};

/// Discretize a sphere centered at the origin as a mesh, with its poles on the `z` axis.
///
/// `ntheta_subdiv` is the number of subdivisions around the `z` axis, and `nphi_subdiv` the
/// number of subdivisions from one pole to the other. With an even `nphi_subdiv`, one ring
/// of vertices lies exactly on the equator.
///
/// Vertices are duplicated along the texture seam at `theta = 0`.
pub fn uv_sphere(radius: Real, ntheta_subdiv: u32, nphi_subdiv: u32) -> Mesh {
    let ntheta = ntheta_subdiv.max(3);
    let nphi = nphi_subdiv.max(2);
    let ring_len = ntheta + 1;

    let mut positions = vec![];
    let mut normals = vec![];
    let mut uvs = vec![];

    let mut push_vertex = |dir: Vector<Real>, uv: Uv| {
        positions.push(Point::from(dir * radius));
        normals.push(dir);
        uvs.push(uv);
    };

    push_vertex(-Vector::z(), Uv::new(0.5, 0.0));

    for k in 1..nphi {
        let phi = -FRAC_PI_2 + PI * k as Real / nphi as Real;
        let mut first = Vector::zeros();

        for j in 0..ring_len {
            let dir = if j == ntheta {
                // Same bits as the first vertex of the ring.
                first
            } else {
                let theta = 2.0 * PI * j as Real / ntheta as Real;
                Vector::new(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin())
            };

            if j == 0 {
                first = dir;
            }

            push_vertex(dir, Uv::new(j as Real / ntheta as Real, k as Real / nphi as Real));
        }
    }

    push_vertex(Vector::z(), Uv::new(0.5, 1.0));

    let south = 0;
    let north = 1 + (nphi - 1) * ring_len;
    let ring = |k: u32| 1 + (k - 1) * ring_len;
    let mut idx = vec![];

    for j in 0..ntheta {
        idx.push([south, ring(1) + j + 1, ring(1) + j]);
    }

    for k in 1..nphi - 1 {
        let (lower, upper) = (ring(k), ring(k + 1));
        for j in 0..ntheta {
            idx.push([lower + j, lower + j + 1, upper + j + 1]);
            idx.push([lower + j, upper + j + 1, upper + j]);
        }
    }

    for j in 0..ntheta {
        idx.push([ring(nphi - 1) + j, ring(nphi - 1) + j + 1, north]);
    }

    Mesh::from_raw_parts(positions, normals, uvs, None, idx)
}
