//! AttackRecord - the archived transaction of one declared attack

use crate::gear::WeaponSnapshot;
use crate::types::{ActorId, DefenseKind, RecordId};
use serde::{Deserialize, Serialize};

/// A dodge, parry, or explicit pass attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseRoll {
    pub kind: DefenseKind,
    pub successes: u32,
}

/// A soak roll attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoakRoll {
    pub successes: u32,
    /// Flat reduction contributed by the armor rolled with
    pub damage_reduction: u32,
    /// Absent when the defender had no active armor
    pub armor_name: Option<String>,
}

/// One declared attack, frozen at declaration time
///
/// Created by attack resolution, mutated only to attach a defense or soak
/// result (each settable exactly once), read by the damage pipeline, and
/// archived in the session for as long as it lives. A record with empty
/// slots is awaiting a defense choice; it may stay that way indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub id: RecordId,

    // === Parties ===
    pub attacker: ActorId,
    pub attacker_name: String,
    pub target: ActorId,
    pub target_name: String,

    // === Weapon and cost ===
    pub weapon: WeaponSnapshot,
    pub invested_stamina: u32,
    pub stamina_tax: u32,
    pub total_cost: u32,

    // === Roll ===
    pub attack_successes: u32,
    /// Final face values, kept for auditability
    pub faces: Vec<u8>,
    /// Did any die show a 6
    pub has_critical_six: bool,
    /// Successes > 0
    pub hit: bool,

    // === Attach-once slots ===
    pub defense: Option<DefenseRoll>,
    pub soak: Option<SoakRoll>,
}

impl AttackRecord {
    /// Attach a dodge/parry/pass result; false when the slot is occupied
    pub fn attach_defense(&mut self, roll: DefenseRoll) -> bool {
        if self.defense.is_some() {
            return false;
        }
        self.defense = Some(roll);
        true
    }

    /// Attach a soak result; false when the slot is occupied
    pub fn attach_soak(&mut self, roll: SoakRoll) -> bool {
        if self.soak.is_some() {
            return false;
        }
        self.soak = Some(roll);
        true
    }

    /// Defense successes, zero while the slot is empty
    pub fn defense_successes(&self) -> u32 {
        self.defense.as_ref().map_or(0, |d| d.successes)
    }

    /// Soak successes, zero while the slot is empty
    pub fn soak_successes(&self) -> u32 {
        self.soak.as_ref().map_or(0, |s| s.successes)
    }

    /// Flat armor reduction from the attached soak, zero when absent
    pub fn soak_reduction(&self) -> u32 {
        self.soak.as_ref().map_or(0, |s| s.damage_reduction)
    }
}
