//! Chat-facing entry points.

pub mod commands;

pub use commands::{ChatCommand, CommandDispatcher};
