//! Turn state - current combatant and the escalating per-turn attack tax

use crate::types::ActorId;
use std::collections::HashMap;

/// Tracks whose turn it is and each actor's attack surcharge
///
/// The tax applies to the *next* attack: the k-th attack an actor declares
/// within one turn pays its invested stamina plus k-1. A turn boundary
/// resets the incoming actor's counter.
#[derive(Debug, Clone, Default)]
pub struct TurnTracker {
    taxes: HashMap<ActorId, u32>,
    current: Option<ActorId>,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an encounter is currently running
    pub fn combat_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_combatant(&self) -> Option<&ActorId> {
        self.current.as_ref()
    }

    pub fn is_current(&self, id: &ActorId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Turn boundary: `current` begins their turn with a zeroed tax
    pub fn turn_changed(&mut self, current: &ActorId) {
        self.taxes.insert(current.clone(), 0);
        self.current = Some(current.clone());
    }

    /// Encounter over; nobody holds the turn and all surcharges clear
    pub fn end_combat(&mut self) {
        self.current = None;
        self.taxes.clear();
    }

    /// Surcharge the actor's next attack this turn must pay, 0 if unset
    pub fn current_tax(&self, id: &ActorId) -> u32 {
        self.taxes.get(id).copied().unwrap_or(0)
    }

    /// Record a paid-for attack; the surcharge rises for the following one
    pub fn register_attack(&mut self, id: &ActorId) {
        *self.taxes.entry(id.clone()).or_insert(0) += 1;
    }
}
