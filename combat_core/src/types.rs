//! Core identifiers and enums shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an actor in the combat roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        ActorId(s.to_string())
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        ActorId(s)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for an archived attack record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four base characteristics feeding dice pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Might,
    Grace,
    Shell,
    Insight,
}

impl Characteristic {
    /// Get all characteristics
    pub fn all() -> &'static [Characteristic] {
        &[
            Characteristic::Might,
            Characteristic::Grace,
            Characteristic::Shell,
            Characteristic::Insight,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Characteristic::Might => "might",
            Characteristic::Grace => "grace",
            Characteristic::Shell => "shell",
            Characteristic::Insight => "insight",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kinds of actor documents the engine operates on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    #[default]
    Character,
    Npc,
    Creature,
}

/// Weapon delivery category, normalized once at ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCategory {
    Melee,
    Ranged,
}

impl RangeCategory {
    /// The characteristic an attack with this category rolls on
    pub fn attack_characteristic(&self) -> Characteristic {
        match self {
            RangeCategory::Melee => Characteristic::Might,
            RangeCategory::Ranged => Characteristic::Grace,
        }
    }
}

/// Bounded actor resource pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Hearts,
    Soul,
    Stamina,
}

impl PoolKind {
    pub fn name(&self) -> &'static str {
        match self {
            PoolKind::Hearts => "hearts",
            PoolKind::Soul => "soul",
            PoolKind::Stamina => "stamina",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A defender's reaction to a pending attack
///
/// `None` is an explicit pass (e.g. a dismissed choice) and records a zero
/// defense rather than leaving the record waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseKind {
    Dodge,
    Parry,
    Soak,
    None,
}

impl fmt::Display for DefenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefenseKind::Dodge => "dodge",
            DefenseKind::Parry => "parry",
            DefenseKind::Soak => "soak",
            DefenseKind::None => "none",
        };
        f.write_str(name)
    }
}
