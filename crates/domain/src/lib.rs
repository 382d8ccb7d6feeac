//! DiceBot domain - pure types for the dice room.
//!
//! Everything in this crate is synchronous and side-effect free: dice slots,
//! the bounded registry that discovers them, and the hand evaluators. Command
//! emission, pacing, and result collection live in `dicebot-engine`.

pub mod dice;
pub mod error;
pub mod hand;
pub mod ids;
pub mod registry;

pub use dice::{Die, SightingKind};
pub use error::DomainError;
pub use hand::{classify, evaluate_hand, sum_hand, LetterPlacement};
pub use ids::DieId;
pub use registry::{DiceRegistry, Observed, MAX_DICE};
