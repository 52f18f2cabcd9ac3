use cutter3d::math::{Point, Vector};
use cutter3d::query::split::{
    cut_mesh, intersect_plane, split_mesh, CutError, CutOptions, EdgeSides,
};
use cutter3d::shape::{CutPath, CutPlane, Mesh};
use cutter3d::transformation::to_mesh;

fn unit_cube() -> Mesh {
    to_mesh::cuboid(&Vector::repeat(0.5))
}

#[test]
fn unit_cube_cut_at_mid_height() {
    let cube = unit_cube();
    assert_eq!(cube.vertex_count(), 8);
    assert_eq!(cube.triangle_count(), 12);

    let plane = CutPlane::new(Point::origin(), Vector::z()).unwrap();
    let result = cut_mesh(&cube, &CutPath::single(plane), &CutOptions::default()).unwrap();

    assert_eq!(result.pieces.len(), 2);
    assert_eq!(result.stats.splits, 1);
    assert_eq!(result.stats.source_triangles, 12);
    assert_eq!(result.stats.output_triangles, result.triangle_count());

    let mut volume = 0.0;
    for piece in &result.pieces {
        // Each side face splits into a triangle and a quad, and the 8-point loop needs 6
        // cap triangles: a closed half needs 14 + 6 triangles, not the 6 + 2 of a bare box.
        assert_eq!(piece.body_triangles().len(), 14);
        assert_eq!(piece.cap_triangles().len(), 6);
        assert!(piece.mesh.is_closed());
        volume += piece.mesh.signed_volume();
    }
    assert_relative_eq!(volume, cube.signed_volume(), epsilon = 1.0e-5);
}

#[test]
fn split_counters_add_up() {
    let cube = unit_cube();
    let plane = CutPlane::new(Point::new(0.1, -0.2, 0.05), Vector::new(0.4, 0.3, 1.0)).unwrap();
    let out = split_mesh(&cube, &plane, &CutOptions::default()).unwrap();

    assert_eq!(
        out.front.mesh.triangle_count() + out.back.mesh.triangle_count(),
        out.stats.front_fragments + out.stats.back_fragments + out.stats.cap_triangles
    );
    assert_eq!(out.front.cap_triangles().len() + out.back.cap_triangles().len(), out.stats.cap_triangles);
    assert!(out.front.mesh.is_closed());
    assert!(out.back.mesh.is_closed());
}

#[test]
fn plane_above_the_mesh() {
    let cube = unit_cube();
    let plane = CutPlane::new(Point::new(0.0, 0.0, 3.0), Vector::z()).unwrap();

    assert_eq!(
        cut_mesh(&cube, &CutPath::single(plane), &CutOptions::default()),
        Err(CutError::NoIntersection)
    );
    assert_eq!(cube.triangle_count(), 12);
}

#[test]
fn straddling_triangle_with_a_vertex_on_the_plane() {
    let triangle = Mesh::from_positions(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let plane = CutPlane::new(Point::origin(), Vector::z()).unwrap();

    let intersection = intersect_plane(&triangle, &plane, 1.0e-5).unwrap();
    assert_eq!(intersection.straddling, vec![0]);
    assert_eq!(intersection.edges.len(), 1);
    assert_eq!(intersection.edges[0].sides, EdgeSides::Both);

    let out = split_mesh(&triangle, &plane, &CutOptions::uncapped()).unwrap();
    assert_eq!(out.front.mesh.triangle_count(), 1);
    assert_eq!(out.back.mesh.triangle_count(), 1);
    // The cut edge is open on each side, next to the two original edges.
    assert_eq!(out.front.mesh.boundary_edges().len(), 3);
    assert_eq!(out.back.mesh.boundary_edges().len(), 3);
}

#[test]
fn malformed_meshes_are_rejected() {
    let mesh = Mesh::from_positions(
        vec![Point::new(0.0, 0.0, -1.0), Point::new(1.0, 0.0, 1.0)],
        vec![],
    );
    assert!(mesh.is_err());

    let plane = CutPlane::new(Point::origin(), Vector::z()).unwrap();
    let mut options = CutOptions::default();
    options.flags |= cutter3d::query::split::CutFlags::STRICT_TOPOLOGY;

    // Three triangles sharing the same edge.
    let fan = Mesh::from_positions(
        vec![
            Point::new(0.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 1, 3], [0, 1, 4]],
    )
    .unwrap();

    assert!(matches!(
        cut_mesh(&fan, &CutPath::single(plane), &options),
        Err(CutError::MalformedMesh(_))
    ));
}
