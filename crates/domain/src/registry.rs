//! Bounded registry of the dice slots discovered in the room.
//!
//! The room is assumed to hold exactly [`MAX_DICE`] relevant dice. Slots are
//! appended in first-sighting order and never reordered; once the registry is
//! full, sightings of further unseen ids are treated as noise and dropped.

use serde::{Deserialize, Serialize};

use crate::dice::{Die, SightingKind};
use crate::ids::DieId;

/// Number of dice in a poker setup.
pub const MAX_DICE: usize = 5;

/// Outcome of observing a die id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// A new slot was created for the id.
    Added,
    /// The id was already registered; the existing slot is untouched.
    Known,
    /// The id was not registered: the registry is full or the id is invalid.
    Ignored,
}

/// Ordered collection of at most [`MAX_DICE`] dice, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiceRegistry {
    slots: Vec<Die>,
}

impl DiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a die id on one of the sighting streams.
    ///
    /// First-writer-wins: if the id is already registered the slot keeps the
    /// flags from its first sighting. Unknown ids create a new slot while
    /// there is room; a zero id or a full registry leaves the collection
    /// unchanged.
    pub fn observe(&mut self, id: DieId, kind: SightingKind) -> Observed {
        if !id.is_valid() {
            return Observed::Ignored;
        }
        if self.find(id).is_some() {
            return Observed::Known;
        }
        if self.slots.len() >= MAX_DICE {
            return Observed::Ignored;
        }
        self.slots.push(Die::from_sighting(id, kind));
        Observed::Added
    }

    pub fn find(&self, id: DieId) -> Option<&Die> {
        self.slots.iter().find(|d| d.id == id)
    }

    pub fn find_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.slots.iter_mut().find(|d| d.id == id)
    }

    /// Slots in first-sighting order.
    pub fn slots(&self) -> &[Die] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Die] {
        &mut self.slots
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_DICE
    }

    /// Forget every slot. Only the session coordinator calls this, after any
    /// in-flight result wait has been drained.
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}
