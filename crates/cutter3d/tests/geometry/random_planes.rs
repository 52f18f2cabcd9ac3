use cutter3d::math::{Point, Real, Vector};
use cutter3d::query::split::{cut_mesh, split_mesh, CutError, CutOptions};
use cutter3d::shape::{CutPath, CutPlane, Mesh};
use cutter3d::transformation::to_mesh;

fn random_plane(rng: &mut oorandom::Rand32, extent: Real) -> CutPlane {
    let mut coord = || rng.rand_float() * 2.0 - 1.0;
    let origin = Point::new(coord(), coord(), coord()) * extent;
    let normal = Vector::new(coord(), coord(), coord());
    CutPlane::new(origin, normal).unwrap_or_else(|| CutPlane::new(origin, Vector::z()).unwrap())
}

fn check_random_splits(mesh: &Mesh, seed: u64) {
    let mut rng = oorandom::Rand32::new(seed);
    let volume = mesh.signed_volume();
    let mut splits = 0;

    for _ in 0..40 {
        let plane = random_plane(&mut rng, 0.6);

        match split_mesh(mesh, &plane, &CutOptions::default()) {
            Ok(out) => {
                splits += 1;
                assert!(out.front.mesh.is_closed(), "open front piece for {:?}", plane);
                assert!(out.back.mesh.is_closed(), "open back piece for {:?}", plane);
                assert_eq!(
                    out.front.mesh.triangle_count() + out.back.mesh.triangle_count(),
                    out.stats.output_triangles()
                );
                assert_relative_eq!(
                    out.front.mesh.signed_volume() + out.back.mesh.signed_volume(),
                    volume,
                    epsilon = 1.0e-3
                );
            }
            Err(CutError::NoIntersection) | Err(CutError::DegenerateCut { .. }) => {}
            Err(err) => panic!("unexpected error {:?} for {:?}", err, plane),
        }
    }

    assert!(splits > 0);
}

#[test]
fn random_planes_through_a_sphere() {
    check_random_splits(&to_mesh::uv_sphere(1.0, 20, 11), 42);
}

#[test]
fn random_planes_through_a_cube() {
    check_random_splits(&to_mesh::cuboid(&Vector::new(0.5, 0.7, 0.3)), 7);
}

#[test]
fn random_swept_cuts() {
    let sphere = to_mesh::uv_sphere(1.0, 16, 9);
    let volume = sphere.signed_volume();
    let mut rng = oorandom::Rand32::new(1234);

    for _ in 0..10 {
        let path: CutPath = (0..3).map(|_| random_plane(&mut rng, 0.5)).collect();

        match cut_mesh(&sphere, &path, &CutOptions::default()) {
            Ok(result) => {
                assert!(result.pieces.len() >= 2);
                assert!(result.is_closed());
                assert_eq!(result.stats.output_triangles, result.triangle_count());

                let total: Real = result.pieces.iter().map(|p| p.mesh.signed_volume()).sum();
                assert_relative_eq!(total, volume, epsilon = 1.0e-3);
            }
            Err(CutError::NoIntersection) => {}
            Err(err) => panic!("unexpected error {:?}", err),
        }
    }
}
