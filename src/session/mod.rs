//! Cut sessions driven by controller input.
//!
//! A [`CutSessionController`] owns one session per hand. Host input events are turned into
//! [`CutCommand`]s by an [`InputAdapter`], the target mesh is picked through a
//! [`SpatialQuery`], and the finished pieces are handed back through a [`MeshHost`].

pub use self::config::{CutMode, CutterConfig};
pub use self::controller::{CutSessionController, SessionEvent};
pub use self::error::{CancelReason, SessionError};
pub use self::host::{CutTarget, MeshHost, MeshId, Mobility, SpatialQuery};
pub use self::input::{ActionMapper, ControllerAction, CutCommand, Hand, InputAdapter};
pub use self::session::{CutPhase, CutSession};

mod config;
mod controller;
mod error;
mod host;
mod input;
mod session;
