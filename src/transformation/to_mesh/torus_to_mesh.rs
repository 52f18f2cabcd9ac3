use crate::math::{Point, Real, Uv, Vector};
use crate::shape::Mesh;
use core::f32::consts::PI;

/// Discretize a torus centered at the origin, revolving around the `z` axis, as a mesh.
///
/// `major_radius` is the distance from the origin to the center of the tube and
/// `minor_radius` the radius of the tube. Vertices are duplicated along both texture seams.
pub fn torus(
    major_radius: Real,
    minor_radius: Real,
    nmajor_subdiv: u32,
    nminor_subdiv: u32,
) -> Mesh {
    let nmajor = nmajor_subdiv.max(3);
    let nminor = nminor_subdiv.max(3);
    let angle = |i: u32, n: u32| 2.0 * PI * (i % n) as Real / n as Real;

    let mut positions = vec![];
    let mut normals = vec![];
    let mut uvs = vec![];

    for i in 0..=nmajor {
        // `i % n` makes both ends of a seam bit-identical.
        let theta = angle(i, nmajor);
        let center = Vector::new(theta.cos(), theta.sin(), 0.0) * major_radius;

        for j in 0..=nminor {
            let phi = angle(j, nminor);
            let dir = Vector::new(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin());

            positions.push(Point::from(center + dir * minor_radius));
            normals.push(dir);
            uvs.push(Uv::new(
                i as Real / nmajor as Real,
                j as Real / nminor as Real,
            ));
        }
    }

    let vid = |i: u32, j: u32| i * (nminor + 1) + j;
    let mut idx = vec![];

    for i in 0..nmajor {
        for j in 0..nminor {
            let (a, b, c, d) = (vid(i, j), vid(i + 1, j), vid(i + 1, j + 1), vid(i, j + 1));
            idx.push([a, b, c]);
            idx.push([a, c, d]);
        }
    }

    Mesh::from_raw_parts(positions, normals, uvs, None, idx)
}
