//! Session orchestration use cases.

pub mod roll_session;

pub use roll_session::{RollCoordinator, SessionError, SessionMode};
