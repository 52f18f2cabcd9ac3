use cutter3d::math::{Point, Real, Vector};
use cutter3d::query::split::{split_mesh, CutOptions};
use cutter3d::shape::CutPlane;
use cutter3d::transformation::to_mesh;

#[test]
fn convex_round_trip() {
    let sphere = to_mesh::uv_sphere(1.0, 16, 9);
    let plane = CutPlane::new(Point::new(0.0, 0.1, 0.0), Vector::new(0.3, 0.2, 1.0)).unwrap();
    let out = split_mesh(&sphere, &plane, &CutOptions::default()).unwrap();

    let body_positions: Vec<Point<Real>> = [&out.front, &out.back]
        .into_iter()
        .flat_map(|piece| {
            piece
                .body_triangles()
                .flat_map(|i| piece.mesh.indices()[i])
                .map(|v| piece.mesh.positions()[v as usize])
        })
        .collect();

    for pt in sphere.positions() {
        assert!(body_positions.contains(pt), "lost vertex {:?}", pt);
    }

    for pt in &body_positions {
        if !sphere.positions().contains(pt) {
            assert!(plane.signed_distance(pt).abs() <= 1.0e-5);
        }
    }

    let volume = out.front.mesh.signed_volume() + out.back.mesh.signed_volume();
    assert_relative_eq!(volume, sphere.signed_volume(), epsilon = 1.0e-4);
}
