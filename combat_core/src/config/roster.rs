//! Roster definitions - actors and gear as they arrive from storage
//!
//! This is the single place where loosely-typed stored values (fractional
//! characteristics, free-form range strings) are normalized into the typed
//! model the engine works with.

use super::ConfigError;
use crate::actor::{Actor, Characteristics, Pool};
use crate::gear::{Armor, Weapon};
use crate::types::{ActorId, ActorKind, RangeCategory};
use serde::{Deserialize, Serialize};

fn default_equipped() -> bool {
    true
}

/// A roster file: the actors taking part in an encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub actors: Vec<ActorConfig>,
}

impl RosterConfig {
    /// Build engine actors from the raw definitions
    pub fn into_actors(self) -> Result<Vec<Actor>, ConfigError> {
        self.actors.into_iter().map(ActorConfig::into_actor).collect()
    }
}

/// One stored actor: characteristics may be fractional, pools are given as
/// maxima and start full
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ActorKind,
    pub might: f64,
    pub grace: f64,
    pub shell: f64,
    pub insight: f64,
    pub hearts: u32,
    pub soul: u32,
    pub stamina: u32,
    #[serde(default)]
    pub absorption: u32,
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
    #[serde(default)]
    pub armor: Vec<ArmorConfig>,
}

impl ActorConfig {
    pub fn into_actor(self) -> Result<Actor, ConfigError> {
        let characteristics = Characteristics {
            might: self.might,
            grace: self.grace,
            shell: self.shell,
            insight: self.insight,
        };
        for c in crate::types::Characteristic::all() {
            if characteristics.get(*c) < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} of actor '{}' must be non-negative",
                    c, self.id
                )));
            }
        }

        Ok(Actor {
            id: ActorId(self.id),
            name: self.name,
            kind: self.kind,
            characteristics,
            hearts: Pool::full(self.hearts),
            soul: Pool::full(self.soul),
            stamina: Pool::full(self.stamina),
            absorption: self.absorption,
            weapons: self
                .weapons
                .into_iter()
                .map(WeaponConfig::into_weapon)
                .collect::<Result<_, _>>()?,
            armor: self.armor.into_iter().map(ArmorConfig::into_armor).collect(),
        })
    }
}

/// A stored weapon; `range` arrives as a free-form string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    #[serde(default)]
    pub quality: u32,
    pub range: String,
    #[serde(default)]
    pub range_distance: u32,
    pub base_damage: u32,
    #[serde(default)]
    pub rerolls: u32,
    #[serde(default)]
    pub initiative_bonus: i32,
    #[serde(default = "default_equipped")]
    pub equipped: bool,
}

impl WeaponConfig {
    pub fn into_weapon(self) -> Result<Weapon, ConfigError> {
        let range = match self.range.to_ascii_lowercase().as_str() {
            "melee" => RangeCategory::Melee,
            "ranged" => RangeCategory::Ranged,
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown range category '{}' on weapon '{}'",
                    other, self.name
                )))
            }
        };

        Ok(Weapon {
            name: self.name,
            quality: self.quality,
            range,
            range_distance: self.range_distance,
            base_damage: self.base_damage,
            rerolls: self.rerolls,
            initiative_bonus: self.initiative_bonus,
            equipped: self.equipped,
        })
    }
}

/// A stored armor piece; durability is given as a maximum and starts full
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorConfig {
    pub name: String,
    pub durability: u32,
    #[serde(default)]
    pub soak_bonus: u32,
    #[serde(default)]
    pub soak_rerolls: u32,
    #[serde(default)]
    pub damage_reduction: u32,
    #[serde(default = "default_equipped")]
    pub equipped: bool,
}

impl ArmorConfig {
    pub fn into_armor(self) -> Armor {
        Armor {
            name: self.name,
            durability: Pool::full(self.durability),
            // A zero-durability definition arrives already broken
            broken: self.durability == 0,
            soak_bonus: self.soak_bonus,
            soak_rerolls: self.soak_rerolls,
            damage_reduction: self.damage_reduction,
            equipped: self.equipped,
        }
    }
}
