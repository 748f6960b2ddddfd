//! Weapons and armor, including the durability/break state machine

use crate::actor::Pool;
use crate::types::RangeCategory;
use serde::{Deserialize, Serialize};

/// An attack implement carried by an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Craftsmanship rating added to the attack pool
    pub quality: u32,
    pub range: RangeCategory,
    /// Reach in grid units; carried as data, not consumed by the pipeline
    pub range_distance: u32,
    pub base_damage: u32,
    /// Failed attack dice this weapon may re-draw
    pub rerolls: u32,
    /// Carried for the turn-order collaborator; unused by resolution
    pub initiative_bonus: i32,
    pub equipped: bool,
}

impl Weapon {
    /// Freeze the fields an attack needs, taken at declaration time
    pub fn snapshot(&self) -> WeaponSnapshot {
        WeaponSnapshot {
            name: self.name.clone(),
            quality: self.quality,
            range: self.range,
            base_damage: self.base_damage,
            rerolls: self.rerolls,
        }
    }
}

/// Weapon state frozen into an attack record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    pub name: String,
    pub quality: u32,
    pub range: RangeCategory,
    pub base_damage: u32,
    pub rerolls: u32,
}

/// A protective item with a durability counter
///
/// Invariant: `broken` is true whenever `durability.value` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub durability: Pool,
    pub broken: bool,
    /// Dice added to the shell pool when soaking
    pub soak_bonus: u32,
    /// Failed soak dice this armor may re-draw
    pub soak_rerolls: u32,
    /// Flat reduction applied to incoming damage; never turns a nonzero
    /// hit into zero
    pub damage_reduction: u32,
    pub equipped: bool,
}

impl Armor {
    /// Lose one durability; at zero the armor breaks
    ///
    /// No-op on already-broken armor. Returns whether the trigger applied.
    pub fn apply_break_trigger(&mut self) -> bool {
        if self.broken {
            return false;
        }
        self.durability.reduce(1);
        if self.durability.is_empty() {
            self.broken = true;
        }
        true
    }

    /// Equipment maintenance: restore durability and clear the broken flag
    pub fn repair(&mut self) {
        self.durability.restore_to_max();
        self.broken = false;
    }
}
