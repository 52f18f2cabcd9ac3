use crate::scene::{controller, cube_scene, pose_at, NoInput, Pick, Scene, CUBE_HEIGHT};
use cutter3d::math::{Isometry, Vector};
use cutter3d::query::split::CutError;
use cutter3d::session::{
    CancelReason, CutCommand, CutPhase, CutSessionController, CutterConfig, Hand, MeshHost,
    MeshId, Mobility, SessionEvent,
};
use cutter3d::shape::Mesh;
use cutter3d::transformation::to_mesh;

#[test]
fn planar_cut_is_committed() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Right;

    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand,
            pose: pose_at(CUBE_HEIGHT + 0.3)
        }),
        SessionEvent::Began { hand, target: id }
    );
    assert_eq!(ctrl.phase(hand), CutPhase::Active);
    assert!(ctrl.is_locked(id));

    assert!(matches!(
        ctrl.execute(CutCommand::Update {
            hand,
            pose: pose_at(CUBE_HEIGHT + 0.1)
        }),
        SessionEvent::Updated { samples: 1, .. }
    ));

    match ctrl.execute(CutCommand::Commit {
        hand,
        pose: Some(pose_at(CUBE_HEIGHT)),
    }) {
        SessionEvent::Committed {
            hand: h,
            target,
            stats,
        } => {
            assert_eq!(h, hand);
            assert_eq!(target, id);
            assert_eq!(stats.splits, 1);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert_eq!(ctrl.phase(hand), CutPhase::Idle);
    assert_eq!(ctrl.session_count(), 0);
    assert!(!ctrl.is_locked(id));

    let scene = ctrl.host();
    assert!(scene.target(id).is_none());
    assert_eq!(scene.meshes.len(), 2);
    assert_eq!(scene.cuts.len(), 1);

    // The last pose cut the cube at mid-height, in its local frame.
    let result = &scene.cuts[0].1;
    for piece in &result.pieces {
        assert!(piece.mesh.is_closed());
        assert_relative_eq!(piece.mesh.signed_volume(), 0.5, epsilon = 1.0e-5);
    }
    assert!(result
        .pieces
        .iter()
        .any(|p| p.mesh.aabb().maxs.z.abs() <= 1.0e-5));
    assert!(result
        .pieces
        .iter()
        .any(|p| p.separation == Vector::z()));
}

#[test]
fn cancelling_leaves_the_target_untouched() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let before = scene.meshes[&id].mesh.clone();
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Left;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: pose_at(CUBE_HEIGHT),
    });
    let _ = ctrl.execute(CutCommand::Update {
        hand,
        pose: pose_at(CUBE_HEIGHT + 0.2),
    });

    assert_eq!(
        ctrl.execute(CutCommand::Cancel { hand }),
        SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::Requested
        }
    );
    assert_eq!(ctrl.phase(hand), CutPhase::Idle);
    assert_eq!(ctrl.host().meshes[&id].mesh, before);
    assert!(ctrl.host().cuts.is_empty());

    // Nothing left to cancel or commit.
    assert_eq!(ctrl.execute(CutCommand::Cancel { hand }), SessionEvent::Ignored);
    assert_eq!(
        ctrl.execute(CutCommand::Commit { hand, pose: None }),
        SessionEvent::Ignored
    );
}

#[test]
fn missing_the_target_cancels_the_session() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let before = scene.meshes[&id].mesh.clone();
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Right;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: pose_at(CUBE_HEIGHT),
    });

    assert_eq!(
        ctrl.execute(CutCommand::Commit {
            hand,
            pose: Some(pose_at(CUBE_HEIGHT + 3.0))
        }),
        SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::Cut(CutError::NoIntersection)
        }
    );
    assert_eq!(ctrl.host().meshes[&id].mesh, before);
}

#[test]
fn losing_the_target_cancels_the_session() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Left;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: pose_at(CUBE_HEIGHT),
    });
    let _ = ctrl.host_mut().meshes.remove(&id);

    assert_eq!(
        ctrl.execute(CutCommand::Update {
            hand,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::InvalidTarget
        }
    );
    assert_eq!(ctrl.session_count(), 0);
}

#[test]
fn chunked_commit() {
    let (mut scene, _) = cube_scene(Mobility::Movable);
    let sphere = scene.add(
        to_mesh::uv_sphere(1.0, 24, 13),
        pose_at(0.0),
        Mobility::Movable,
    );
    let config = CutterConfig {
        triangles_per_tick: Some(50),
        ..CutterConfig::default()
    };
    let mut ctrl = controller(scene, config);
    let hand = Hand::Right;

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: pose_at(0.2),
    });
    assert_eq!(
        ctrl.execute(CutCommand::Commit { hand, pose: None }),
        SessionEvent::Committing {
            hand,
            target: sphere
        }
    );
    assert_eq!(ctrl.phase(hand), CutPhase::Committing);

    // Nothing is visible to the host while committing.
    assert_eq!(
        ctrl.execute(CutCommand::Update {
            hand,
            pose: pose_at(0.5)
        }),
        SessionEvent::Ignored
    );
    assert!(ctrl.host().target(sphere).is_some());

    let mut ticks = 0;
    let event = loop {
        ticks += 1;
        assert!(ctrl.host().cuts.is_empty());
        let mut events = ctrl.tick();
        if let Some(event) = events.pop() {
            break event;
        }
    };

    assert!(ticks > 1);
    assert!(matches!(event, SessionEvent::Committed { .. }));
    assert_eq!(ctrl.phase(hand), CutPhase::Idle);

    let result = &ctrl.host().cuts[0].1;
    assert_eq!(result.pieces.len(), 2);
    assert!(result.is_closed());
}

/// A controller committing the cut of a sphere over several ticks, after its first tick.
fn committing_sphere() -> (
    CutSessionController<Scene, Pick, NoInput>,
    MeshId,
    Mesh,
) {
    let (mut scene, _) = cube_scene(Mobility::Movable);
    let sphere = to_mesh::uv_sphere(1.0, 24, 13);
    let id = scene.add(sphere.clone(), pose_at(0.0), Mobility::Movable);
    let config = CutterConfig {
        triangles_per_tick: Some(50),
        ..CutterConfig::default()
    };
    let mut ctrl = controller(scene, config);

    let _ = ctrl.execute(CutCommand::Begin {
        hand: Hand::Right,
        pose: pose_at(0.2),
    });
    let _ = ctrl.execute(CutCommand::Commit {
        hand: Hand::Right,
        pose: None,
    });
    assert!(ctrl.tick().is_empty());
    assert_eq!(ctrl.phase(Hand::Right), CutPhase::Committing);

    (ctrl, id, sphere)
}

#[test]
fn cancelling_while_committing_leaves_the_target_untouched() {
    let (mut ctrl, id, sphere) = committing_sphere();
    let hand = Hand::Right;

    assert_eq!(
        ctrl.execute(CutCommand::Cancel { hand }),
        SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::Requested
        }
    );
    assert_eq!(ctrl.phase(hand), CutPhase::Idle);
    assert!(ctrl.tick().is_empty());
    assert!(ctrl.host().cuts.is_empty());
    assert_eq!(ctrl.host().meshes[&id].mesh, sphere);
}

#[test]
fn losing_the_target_while_committing_cancels_the_cut() {
    let (mut ctrl, id, _) = committing_sphere();
    let hand = Hand::Right;
    let _ = ctrl.host_mut().meshes.remove(&id);

    assert_eq!(
        ctrl.tick(),
        vec![SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::InvalidTarget
        }]
    );
    assert_eq!(ctrl.session_count(), 0);
    assert!(ctrl.host().cuts.is_empty());
}

#[test]
fn changing_the_target_while_committing_cancels_the_cut() {
    let (mut ctrl, id, _) = committing_sphere();
    let hand = Hand::Right;
    let cuboid = to_mesh::cuboid(&Vector::repeat(0.5));
    ctrl.host_mut()
        .meshes
        .get_mut(&id)
        .unwrap()
        .mesh = cuboid.clone();

    assert_eq!(
        ctrl.tick(),
        vec![SessionEvent::Cancelled {
            hand,
            target: id,
            reason: CancelReason::InvalidTarget
        }]
    );
    assert!(!ctrl.is_locked(id));
    assert!(ctrl.host().cuts.is_empty());
    assert_eq!(ctrl.host().meshes[&id].mesh, cuboid);
}

#[test]
fn controller_can_move_between_threads() {
    fn assert_send<T: Send>(_: &T) {}

    let (ctrl, _, _) = committing_sphere();
    assert_send(&ctrl);
}

#[test]
fn preview_follows_the_blade() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());
    let hand = Hand::Left;

    assert_eq!(ctrl.preview(hand), None);

    let _ = ctrl.execute(CutCommand::Begin {
        hand,
        pose: pose_at(CUBE_HEIGHT + 0.25),
    });
    let loops = ctrl.preview(hand).unwrap();
    assert_eq!(loops.len(), 1);
    for pt in &loops[0] {
        assert_relative_eq!(pt.z, CUBE_HEIGHT + 0.25, epsilon = 1.0e-5);
    }

    let _ = ctrl.execute(CutCommand::Update {
        hand,
        pose: pose_at(CUBE_HEIGHT + 2.0),
    });
    assert_eq!(ctrl.preview(hand), Some(vec![]));
}

#[test]
fn teardown_cancels_every_session() {
    let (mut scene, first) = cube_scene(Mobility::Movable);
    let second = scene.add(
        cutter3d::transformation::to_mesh::cuboid(&Vector::repeat(0.5)),
        Isometry::translation(3.0, 0.0, CUBE_HEIGHT),
        Mobility::Movable,
    );
    let mut ctrl = controller(scene, CutterConfig::default());

    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Left,
            pose: pose_at(CUBE_HEIGHT),
        }),
        SessionEvent::Began {
            hand: Hand::Left,
            target: first
        }
    );
    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Right,
            pose: Isometry::translation(3.0, 0.0, CUBE_HEIGHT),
        }),
        SessionEvent::Began {
            hand: Hand::Right,
            target: second
        }
    );

    let events = ctrl.cancel_all();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| matches!(
        e,
        SessionEvent::Cancelled {
            reason: CancelReason::Teardown,
            ..
        }
    )));

    assert_eq!(ctrl.session_count(), 0);
    assert_eq!(ctrl.host().meshes.len(), 2);
    assert!(ctrl.host().cuts.is_empty());
    assert!(ctrl.cancel_all().is_empty());
}
