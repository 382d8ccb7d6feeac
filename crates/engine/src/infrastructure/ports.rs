//! Port traits for the game-side boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Sending dice commands to the game server (real connection vs loopback room)
//! - Publishing chat messages (shout in the room vs captured in tests)
//!
//! Inbound traffic (dice sightings, dice values, chat commands) does not get a
//! port: adapters push it into the coordinator's `on_*`/`handle_*` methods.

use async_trait::async_trait;
use dicebot_domain::DieId;

/// Error emitting a packet toward the game server.
///
/// Delivery is fire-and-forget: the coordinator logs these and keeps going,
/// there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Outbound dice commands toward the game server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameServerPort: Send + Sync {
    /// Instruct a die to roll.
    async fn send_throw_dice(&self, id: DieId) -> Result<(), TransportError>;

    /// Instruct a die to turn off.
    async fn send_dice_off(&self, id: DieId) -> Result<(), TransportError>;
}

/// Outbound chat messages, visible to everyone in the room.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatPort: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), TransportError>;
}
