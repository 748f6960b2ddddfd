//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::actor::{Actor, Characteristics, Pool};
pub use crate::types::{
    ActorId, ActorKind, Characteristic, DefenseKind, PoolKind, RangeCategory, RecordId,
};

// Dice
pub use crate::dice::{characteristic_check, roll_pool, CheckOutcome, RollOutcome};

// Gear
pub use crate::gear::{Armor, Weapon, WeaponSnapshot};

// Resolution pipeline
pub use crate::combat::{
    apply_damage, declare_attack, declare_attack_with_rng, resolve_defense,
    resolve_defense_with_rng, AttackRecord, DamageOutcome, DamageReport,
};
pub use crate::session::CombatSession;

// Errors and events
pub use crate::error::{EngineError, Warning};
pub use crate::event::EngineEvent;

// Config
pub use crate::config::{load_toml, parse_toml, RosterConfig};
