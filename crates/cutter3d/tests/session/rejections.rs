use crate::scene::{controller, cube_scene, pose_at, CUBE_HEIGHT};
use cutter3d::session::{
    CutCommand, CutPhase, CutterConfig, Hand, Mobility, SessionError, SessionEvent,
};

#[test]
fn nothing_under_the_blade() {
    let (scene, _) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());

    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Left,
            pose: pose_at(CUBE_HEIGHT + 10.0)
        }),
        SessionEvent::Rejected {
            hand: Hand::Left,
            error: SessionError::NoTarget
        }
    );
    assert_eq!(ctrl.phase(Hand::Left), CutPhase::Idle);
}

#[test]
fn static_meshes_cannot_be_cut() {
    let (scene, _) = cube_scene(Mobility::Static);
    let mut ctrl = controller(scene, CutterConfig::default());

    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Right,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Rejected {
            hand: Hand::Right,
            error: SessionError::ImmovableTarget
        }
    );
    assert_eq!(ctrl.session_count(), 0);
}

#[test]
fn one_session_per_mesh_and_per_hand() {
    let (scene, id) = cube_scene(Mobility::Movable);
    let mut ctrl = controller(scene, CutterConfig::default());

    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Left,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Began {
            hand: Hand::Left,
            target: id
        }
    );
    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Left,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Rejected {
            hand: Hand::Left,
            error: SessionError::SessionInProgress
        }
    );
    assert_eq!(
        ctrl.execute(CutCommand::Begin {
            hand: Hand::Right,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Rejected {
            hand: Hand::Right,
            error: SessionError::TargetBusy
        }
    );

    assert_eq!(ctrl.session_count(), 1);
    assert_eq!(ctrl.phase(Hand::Right), CutPhase::Idle);
    assert_eq!(
        ctrl.execute(CutCommand::Update {
            hand: Hand::Right,
            pose: pose_at(CUBE_HEIGHT)
        }),
        SessionEvent::Ignored
    );
}
