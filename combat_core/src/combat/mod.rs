//! Combat resolution - the attack / defense / damage pipeline

mod attack;
mod damage;
mod defense;
mod record;

pub use attack::{declare_attack, declare_attack_with_rng};
pub use damage::{apply_damage, ArmorBreakReport, DamageOutcome, DamageReport};
pub use defense::{resolve_defense, resolve_defense_with_rng};
pub use record::{AttackRecord, DefenseRoll, SoakRoll};
