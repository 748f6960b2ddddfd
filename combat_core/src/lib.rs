//! combat_core - Dice-pool combat resolution for a turn-based tabletop game
//!
//! This library provides:
//! - Dice pools: d6 success counting with bounded reroll-of-failures
//! - CombatSession: actor roster, turn state, and the attack record archive
//! - Attack/defense/damage resolution: the full exchange pipeline
//! - Armor durability: degradation on critical hits, repair out of combat
//!
//! The engine owns rules and state only. Turn scheduling, rendering, and
//! persistence belong to the embedding layers, which drive the engine
//! through [`CombatSession`] and consume its [`EngineEvent`] stream.

pub mod actor;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod event;
pub mod gear;
pub mod prelude;
pub mod resource;
pub mod session;
pub mod turn;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, Characteristics, Pool};
pub use combat::{
    apply_damage, declare_attack, declare_attack_with_rng, resolve_defense,
    resolve_defense_with_rng, AttackRecord, DamageOutcome, DamageReport, DefenseRoll, SoakRoll,
};
pub use dice::{
    characteristic_check, characteristic_check_with_rng, roll_pool, roll_pool_with_rng,
    CheckOutcome, RollOutcome,
};
pub use error::{EngineError, Warning};
pub use event::EngineEvent;
pub use gear::{Armor, Weapon, WeaponSnapshot};
pub use session::CombatSession;
pub use turn::TurnTracker;
pub use types::{
    ActorId, ActorKind, Characteristic, DefenseKind, PoolKind, RangeCategory, RecordId,
};
