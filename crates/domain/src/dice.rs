//! Dice slot state.
//!
//! A [`Die`] tracks one physical die in the room: its server-assigned id, the
//! last face value it reported, and whether it is currently rolling or turned
//! off. Slots are discovered from packet sightings and live in the
//! [`DiceRegistry`](crate::registry::DiceRegistry).

use serde::{Deserialize, Serialize};

use crate::ids::DieId;

/// Which observation stream first saw a die id.
///
/// The room reveals dice ids when the client instructs one to roll
/// (`THROW_DICE`) or to turn off (`DICE_OFF`). The kind of the first sighting
/// decides the slot's initial flags; later sightings of the other kind for
/// the same id do not overwrite them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SightingKind {
    Roll,
    Close,
}

/// One physical die in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Server-assigned item id. Never zero for a registered die.
    pub id: DieId,
    /// Last reported face value. Zero means unknown or turned off.
    pub value: i32,
    /// A roll command has been issued and no result has arrived yet.
    pub is_rolling: bool,
    /// The die has been turned off.
    pub is_closed: bool,
}

impl Die {
    /// Create a fresh slot from its first sighting.
    pub fn from_sighting(id: DieId, kind: SightingKind) -> Self {
        Self {
            id,
            value: 0,
            is_rolling: kind == SightingKind::Roll,
            is_closed: kind == SightingKind::Close,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Mark the die as rolling (a throw command was just issued for it).
    pub fn mark_rolling(&mut self) {
        self.is_rolling = true;
        self.is_closed = false;
    }

    /// Mark the die as turned off.
    pub fn mark_closed(&mut self) {
        self.is_closed = true;
        self.is_rolling = false;
    }

    /// Record a decoded face value reported by the server.
    pub fn record_value(&mut self, value: i32) {
        self.value = value;
        self.is_rolling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_roll_sighting() {
        let die = Die::from_sighting(DieId::new(371), SightingKind::Roll);
        assert_eq!(die.value, 0);
        assert!(die.is_rolling);
        assert!(!die.is_closed);
        assert!(die.is_valid());
    }

    #[test]
    fn test_from_close_sighting() {
        let die = Die::from_sighting(DieId::new(371), SightingKind::Close);
        assert!(!die.is_rolling);
        assert!(die.is_closed);
    }

    #[test]
    fn test_record_value_clears_rolling() {
        let mut die = Die::from_sighting(DieId::new(371), SightingKind::Roll);
        die.record_value(5);
        assert_eq!(die.value, 5);
        assert!(!die.is_rolling);
    }

    #[test]
    fn test_mark_closed_clears_rolling() {
        let mut die = Die::from_sighting(DieId::new(371), SightingKind::Roll);
        die.mark_closed();
        assert!(die.is_closed);
        assert!(!die.is_rolling);
    }
}
