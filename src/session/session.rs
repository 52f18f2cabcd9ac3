use crate::query::split::CutJob;
use crate::session::{Hand, MeshId};
use crate::shape::CutPath;

/// The lifecycle phase of a cut session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CutPhase {
    /// No cut in progress.
    #[default]
    Idle,
    /// The gesture is in progress and blade samples are being recorded.
    Active,
    /// The gesture ended and the cut is being computed over several ticks.
    Committing,
    /// The pieces were handed to the host.
    Committed,
    /// The session ended without touching its target.
    Cancelled,
}

/// The state of one cutting gesture.
pub struct CutSession {
    pub(crate) target: MeshId,
    pub(crate) hand: Hand,
    pub(crate) path: CutPath,
    pub(crate) phase: CutPhase,
    pub(crate) job: Option<CutJob>,
}

impl CutSession {
    pub(crate) fn new(target: MeshId, hand: Hand, path: CutPath) -> Self {
        Self {
            target,
            hand,
            path,
            phase: CutPhase::Active,
            job: None,
        }
    }

    /// The mesh being cut.
    #[inline]
    pub fn target(&self) -> MeshId {
        self.target
    }

    /// The hand driving this session.
    #[inline]
    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// The world-space blade samples recorded so far.
    #[inline]
    pub fn path(&self) -> &CutPath {
        &self.path
    }

    /// The current phase.
    #[inline]
    pub fn phase(&self) -> CutPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: CutPhase) {
        log::debug!(
            "{:?} hand cutting {:?}: {:?} -> {:?}",
            self.hand,
            self.target,
            self.phase,
            phase
        );
        self.phase = phase;
    }
}
