use crate::math::{Isometry, Real, Vector2};

/// A hand holding a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Hand {
    /// The left hand.
    Left,
    /// The right hand.
    Right,
}

impl Hand {
    /// Both hands.
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// A command understood by the [`CutSessionController`](crate::session::CutSessionController).
///
/// Poses are world-space poses of the controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CutCommand {
    /// Starts a cut with the blade at `pose`.
    Begin {
        /// The hand starting the cut.
        hand: Hand,
        /// The controller pose.
        pose: Isometry<Real>,
    },
    /// Records a new blade sample.
    Update {
        /// The hand driving the cut.
        hand: Hand,
        /// The controller pose.
        pose: Isometry<Real>,
    },
    /// Ends the gesture and cuts the target.
    Commit {
        /// The hand driving the cut.
        hand: Hand,
        /// A last controller pose, recorded before cutting.
        pose: Option<Isometry<Real>>,
    },
    /// Abandons the cut.
    Cancel {
        /// The hand driving the cut.
        hand: Hand,
    },
    /// Rotates the blade around its roll axis.
    RollBlade {
        /// The hand holding the blade.
        hand: Hand,
        /// The roll increment, in radians.
        angle: Real,
    },
    /// Brings the blade back to its rest orientation.
    ResetBlade {
        /// The hand holding the blade.
        hand: Hand,
    },
}

impl CutCommand {
    /// The hand this command applies to.
    pub fn hand(&self) -> Hand {
        match *self {
            CutCommand::Begin { hand, .. }
            | CutCommand::Update { hand, .. }
            | CutCommand::Commit { hand, .. }
            | CutCommand::Cancel { hand }
            | CutCommand::RollBlade { hand, .. }
            | CutCommand::ResetBlade { hand } => hand,
        }
    }
}

/// Translates host input events into cut commands.
pub trait InputAdapter {
    /// The input events of the host.
    type Event;

    /// The command triggered by `event`, if any.
    fn translate(&mut self, event: Self::Event) -> Option<CutCommand>;
}

impl<T: InputAdapter + ?Sized> InputAdapter for &mut T {
    type Event = T::Event;

    fn translate(&mut self, event: Self::Event) -> Option<CutCommand> {
        (**self).translate(event)
    }
}

/// Raw controller actions, as bound by the host input mapping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ControllerAction {
    /// The cutting mode toggle button was pressed.
    ToggleCut {
        /// The hand pressing the button.
        hand: Hand,
    },
    /// The trigger was pressed.
    TriggerPressed {
        /// The hand pressing the trigger.
        hand: Hand,
        /// The controller pose.
        pose: Isometry<Real>,
    },
    /// The controller moved.
    Moved {
        /// The moving hand.
        hand: Hand,
        /// The controller pose.
        pose: Isometry<Real>,
    },
    /// The trigger was released.
    TriggerReleased {
        /// The hand releasing the trigger.
        hand: Hand,
        /// The controller pose.
        pose: Isometry<Real>,
    },
    /// The thumbstick was held at `axis` during `dt` seconds.
    Thumbstick {
        /// The hand holding the thumbstick.
        hand: Hand,
        /// The thumbstick deflection, each coordinate in `[-1, 1]`.
        axis: Vector2<Real>,
        /// The duration of the frame, in seconds.
        dt: Real,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct HandState {
    cutting_mode: bool,
    trigger_held: bool,
}

/// The default [`InputAdapter`] for [`ControllerAction`]s.
///
/// Each hand has a cutting mode, toggled with [`ControllerAction::ToggleCut`]. While it is
/// on, the trigger begins, updates and commits cuts, and the horizontal thumbstick axis rolls
/// the blade. Leaving the cutting mode with the trigger held cancels the cut.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionMapper {
    /// Blade roll speed, in radians per second at full thumbstick deflection.
    pub roll_speed: Real,
    /// Thumbstick deflections below this value are ignored.
    pub dead_zone: Real,
    hands: [HandState; 2],
}

impl Default for ActionMapper {
    fn default() -> Self {
        Self {
            roll_speed: core::f32::consts::PI,
            dead_zone: 0.15,
            hands: [HandState::default(); 2],
        }
    }
}

impl ActionMapper {
    /// A mapper with both hands out of cutting mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `hand` in cutting mode?
    pub fn is_cutting_mode(&self, hand: Hand) -> bool {
        self.hands[hand.index()].cutting_mode
    }

    /// Is `hand` holding the trigger in cutting mode?
    pub fn is_trigger_held(&self, hand: Hand) -> bool {
        self.hands[hand.index()].trigger_held
    }
}

impl InputAdapter for ActionMapper {
    type Event = ControllerAction;

    fn translate(&mut self, event: ControllerAction) -> Option<CutCommand> {
        match event {
            ControllerAction::ToggleCut { hand } => {
                let state = &mut self.hands[hand.index()];
                state.cutting_mode = !state.cutting_mode;

                if state.cutting_mode {
                    Some(CutCommand::ResetBlade { hand })
                } else if state.trigger_held {
                    state.trigger_held = false;
                    Some(CutCommand::Cancel { hand })
                } else {
                    None
                }
            }
            ControllerAction::TriggerPressed { hand, pose } => {
                let state = &mut self.hands[hand.index()];
                if !state.cutting_mode || state.trigger_held {
                    return None;
                }

                state.trigger_held = true;
                Some(CutCommand::Begin { hand, pose })
            }
            ControllerAction::Moved { hand, pose } => self.hands[hand.index()]
                .trigger_held
                .then_some(CutCommand::Update { hand, pose }),
            ControllerAction::TriggerReleased { hand, pose } => {
                let state = &mut self.hands[hand.index()];
                if !state.trigger_held {
                    return None;
                }

                state.trigger_held = false;
                Some(CutCommand::Commit {
                    hand,
                    pose: Some(pose),
                })
            }
            ControllerAction::Thumbstick { hand, axis, dt } => {
                if !self.hands[hand.index()].cutting_mode || axis.x.abs() < self.dead_zone {
                    return None;
                }

                Some(CutCommand::RollBlade {
                    hand,
                    angle: axis.x * self.roll_speed * dt,
                })
            }
        }
    }
}
