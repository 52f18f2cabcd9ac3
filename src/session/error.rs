use crate::query::split::CutError;

/// Why a cut command was rejected.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Nothing cuttable at the blade position.
    #[error("no cuttable mesh at the blade position")]
    NoTarget,
    /// The target mesh does not exist anymore.
    #[error("the target mesh no longer exists")]
    InvalidTarget,
    /// The target mesh is static.
    #[error("the target mesh is static and cannot be cut")]
    ImmovableTarget,
    /// Another session is already cutting the target mesh.
    #[error("the target mesh is already being cut")]
    TargetBusy,
    /// The hand is already driving a session.
    #[error("a cut is already in progress for this hand")]
    SessionInProgress,
    /// The cut itself failed.
    #[error(transparent)]
    Cut(#[from] CutError),
}

/// Why a session ended without replacing its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The input asked for it.
    Requested,
    /// The target mesh disappeared during the session.
    InvalidTarget,
    /// The cut did not produce any piece.
    Cut(CutError),
    /// Every session was torn down by the host.
    Teardown,
}

impl CancelReason {
    /// The error that ended the session, if it did not end on request.
    pub fn error(&self) -> Option<SessionError> {
        match *self {
            CancelReason::InvalidTarget => Some(SessionError::InvalidTarget),
            CancelReason::Cut(err) => Some(SessionError::Cut(err)),
            CancelReason::Requested | CancelReason::Teardown => None,
        }
    }
}
