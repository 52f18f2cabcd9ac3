use crate::scene::{controller, cube_scene, CUBE_HEIGHT};
use cutter3d::math::{Isometry, Real, Vector};
use cutter3d::session::{CutCommand, CutMode, CutterConfig, Hand, Mobility, SessionEvent};

fn tilted_pose(angle: Real) -> Isometry<Real> {
    Isometry::new(Vector::new(0.0, 0.0, CUBE_HEIGHT), Vector::x() * angle)
}

#[test]
fn swept_cut_through_a_common_axis() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let config = CutterConfig {
        mode: CutMode::Swept,
        ..CutterConfig::default()
    };
    let mut ctrl = controller(scene, config);
    let hand = Hand::Right;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: tilted_pose(0.0),
    });

    // Within the coalescing tolerances of the first sample.
    assert_eq!(
        ctrl.execute(CutCommand::Update {
            hand,
            pose: tilted_pose(0.001)
        }),
        SessionEvent::Updated {
            hand,
            samples: 1,
            sample_added: false
        }
    );
    assert_eq!(
        ctrl.execute(CutCommand::Update {
            hand,
            pose: tilted_pose(0.3)
        }),
        SessionEvent::Updated {
            hand,
            samples: 2,
            sample_added: true
        }
    );

    match ctrl.execute(CutCommand::Commit {
        hand,
        pose: Some(tilted_pose(0.6)),
    }) {
        SessionEvent::Committed { target, stats, .. } => {
            assert_eq!(target, id);
            assert_eq!(stats.planes, 3);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    // Three planes through the x axis cut the cube into six wedges.
    let result = &ctrl.host().cuts[0].1;
    assert_eq!(result.pieces.len(), 6);
    assert!(result.is_closed());

    let volume: Real = result.pieces.iter().map(|p| p.mesh.signed_volume()).sum();
    assert_relative_eq!(volume, 1.0, epsilon = 1.0e-4);
}

#[test]
fn swept_samples_are_capped() {
    let (scene, _) = cube_scene(Mobility::Movable);
    let config = CutterConfig {
        mode: CutMode::Swept,
        max_samples: 3,
        ..CutterConfig::default()
    };
    let mut ctrl = controller(scene, config);
    let hand = Hand::Left;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: tilted_pose(0.0),
    });
    for i in 1..10 {
        let _ = ctrl.execute(CutCommand::Update {
            hand,
            pose: tilted_pose(i as Real * 0.1),
        });
    }

    let path = ctrl.session(hand).unwrap().path();
    assert_eq!(path.len(), 3);

    // The last sample follows the latest pose.
    let expected = ctrl.blade_plane(hand, &tilted_pose(0.9));
    assert_relative_eq!(
        path.last().unwrap().normal().into_inner(),
        expected.normal().into_inner(),
        epsilon = 1.0e-6
    );
}

#[test]
fn blade_roll() {
    let (scene, _) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Left;

    assert_eq!(
        ctrl.execute(CutCommand::RollBlade { hand, angle: 0.5 }),
        SessionEvent::BladeRolled { hand, roll: 0.5 }
    );
    assert_eq!(ctrl.blade_roll(Hand::Right), 0.0);

    let plane = ctrl.blade_plane(hand, &Isometry::identity());
    assert_relative_eq!(
        plane.normal().into_inner(),
        Vector::new(0.0, -(0.5 as Real).sin(), (0.5 as Real).cos()),
        epsilon = 1.0e-6
    );

    let _ = ctrl.execute(CutCommand::ResetBlade { hand });
    assert_eq!(ctrl.blade_roll(hand), 0.0);
    assert_eq!(
        ctrl.blade_plane(hand, &Isometry::identity()).normal(),
        Vector::z_axis()
    );
}
