//! CombatSession - the state container behind every resolution call

use crate::actor::Actor;
use crate::combat::AttackRecord;
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::resource;
use crate::turn::TurnTracker;
use crate::types::{ActorId, PoolKind, RecordId};
use std::collections::HashMap;

/// Owns the roster, turn state, record archive, and pending events
///
/// Every pool and tax mutation flows through `&mut self`, which gives each
/// actor's state the per-actor mutual exclusion the resolution protocol
/// requires.
#[derive(Debug, Default)]
pub struct CombatSession {
    actors: HashMap<ActorId, Actor>,
    pub turns: TurnTracker,
    records: Vec<AttackRecord>,
    events: Vec<EngineEvent>,
}

impl CombatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.insert(actor.id.clone(), actor);
    }

    pub fn contains(&self, id: &ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn actor(&self, id: &ActorId) -> Result<&Actor, EngineError> {
        self.actors.get(id).ok_or_else(|| EngineError::InvalidTarget {
            id: id.clone(),
        })
    }

    pub fn actor_mut(&mut self, id: &ActorId) -> Result<&mut Actor, EngineError> {
        self.actors
            .get_mut(id)
            .ok_or_else(|| EngineError::InvalidTarget { id: id.clone() })
    }

    /// Turn-order collaborator entry point
    ///
    /// The incoming actor's attack tax resets and their stamina refills;
    /// `previous` is accepted for interface parity but needs no bookkeeping.
    pub fn turn_changed(
        &mut self,
        _previous: Option<&ActorId>,
        current: &ActorId,
    ) -> Result<(), EngineError> {
        let actor = self.actor_mut(current)?;
        resource::restore_to_max(actor, PoolKind::Stamina);
        self.turns.turn_changed(current);
        self.events.push(EngineEvent::TurnStarted {
            actor: current.clone(),
        });
        Ok(())
    }

    pub fn end_combat(&mut self) {
        self.turns.end_combat();
    }

    /// Read an archived record
    pub fn record(&self, id: RecordId) -> Result<&AttackRecord, EngineError> {
        self.records
            .get(id.0 as usize)
            .ok_or(EngineError::UnknownRecord { id })
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> Result<&mut AttackRecord, EngineError> {
        self.records
            .get_mut(id.0 as usize)
            .ok_or(EngineError::UnknownRecord { id })
    }

    /// The full archive, oldest first
    pub fn records(&self) -> &[AttackRecord] {
        &self.records
    }

    pub(crate) fn next_record_id(&self) -> RecordId {
        RecordId(self.records.len() as u64)
    }

    pub(crate) fn push_record(&mut self, record: AttackRecord) {
        self.records.push(record);
    }

    pub(crate) fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    /// Drain accumulated events for the presentation layer
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Equipment maintenance: repair an actor's armor by name, or all of it
    pub fn repair_armor(&mut self, id: &ActorId, name: Option<&str>) -> Result<(), EngineError> {
        let actor = self.actor_mut(id)?;
        for armor in actor.armor.iter_mut() {
            if name.map_or(true, |n| armor.name == n) {
                armor.repair();
            }
        }
        Ok(())
    }
}
