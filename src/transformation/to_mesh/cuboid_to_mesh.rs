use crate::math::{Point, Real, Uv, Vector};
use crate::shape::Mesh;

/// Discretize the boundary of a cuboid centered at the origin as a mesh.
///
/// The mesh has 8 vertices and 12 triangles. Normals are averaged at each corner and texture
/// coordinates are projected along the `z` axis.
pub fn cuboid(half_extents: &Vector<Real>) -> Mesh {
    let (vtx, idx) = unit_cuboid();
    let positions: Vec<_> = vtx
        .into_iter()
        .map(|pt| Point::from(pt.coords.component_mul(half_extents) * 2.0))
        .collect();
    let uvs = positions
        .iter()
        .map(|pt| {
            Uv::new(
                pt.x / (half_extents.x * 2.0) + 0.5,
                pt.y / (half_extents.y * 2.0) + 0.5,
            )
        })
        .collect();
    let normals = vec![Vector::zeros(); positions.len()];

    let mut mesh = Mesh::from_raw_parts(positions, normals, uvs, None, idx);
    mesh.recompute_normals();
    mesh
}

/**
 * Generates a cuboid shape with a split index buffer.
 *
 * The cuboid is centered at the origin, and has its half extents set to 0.5.
 */
fn unit_cuboid() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let coords = vec![
        Point::new(-0.5, -0.5, 0.5),
        Point::new(-0.5, -0.5, -0.5),
        Point::new(0.5, -0.5, -0.5),
        Point::new(0.5, -0.5, 0.5),
        Point::new(-0.5, 0.5, 0.5),
        Point::new(-0.5, 0.5, -0.5),
        Point::new(0.5, 0.5, -0.5),
        Point::new(0.5, 0.5, 0.5),
    ];

    let faces = vec![
        [4, 5, 0],
        [5, 1, 0],
        [5, 6, 1],
        [6, 2, 1],
        [6, 7, 3],
        [2, 6, 3],
        [7, 4, 0],
        [3, 7, 0],
        [0, 1, 2],
        [3, 0, 2],
        [7, 6, 5],
        [4, 7, 5],
    ];

    (coords, faces)
}
