use cutter3d::math::{Point, Vector};
use cutter3d::query::split::{split_mesh, CutError, CutOptions};
use cutter3d::shape::CutPlane;
use cutter3d::transformation::to_mesh;

#[test]
fn recutting_a_piece_with_a_missing_plane() {
    let cube = to_mesh::cuboid(&Vector::repeat(0.5));
    let plane = CutPlane::new(Point::origin(), Vector::z()).unwrap();
    let out = split_mesh(&cube, &plane, &CutOptions::default()).unwrap();

    let below = CutPlane::new(Point::new(0.0, 0.0, -0.25), Vector::z()).unwrap();
    assert_eq!(
        split_mesh(&out.front.mesh, &below, &CutOptions::default()),
        Err(CutError::NoIntersection)
    );

    // The cap of each piece lies on the plane, which therefore does not cross it anymore.
    for piece in [&out.front, &out.back] {
        assert_eq!(
            split_mesh(&piece.mesh, &plane, &CutOptions::default()),
            Err(CutError::NoIntersection)
        );
    }
}
