//! Engine failure taxonomy

use crate::types::{ActorId, PoolKind, RecordId};
use thiserror::Error;

/// Recoverable, user-facing engine failures
///
/// Every operation validates its preconditions before mutating any state,
/// so a returned error implies zero side effects for that call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("it is not {actor}'s turn")]
    NotYourTurn { actor: ActorId },

    #[error("the dice pool is empty")]
    NoDice,

    #[error("an attack requires at least 1 invested stamina")]
    AttackMinStamina,

    #[error("not enough {pool}: need {need}, have {have}")]
    InsufficientResource {
        pool: PoolKind,
        need: u32,
        have: u32,
    },

    #[error("exactly one target must be designated")]
    NeedOneTarget,

    #[error("no such combatant: {id}")]
    InvalidTarget { id: ActorId },

    #[error("{actor} has no equipped weapons")]
    NoEquippedWeapons { actor: ActorId },

    #[error("no equipped weapon selected")]
    WeaponNotSelected,

    #[error("unknown attack record {id}")]
    UnknownRecord { id: RecordId },
}

/// Informational conditions that never block resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// Soak was chosen but the equipped armor is broken; the roll proceeds
    /// with a zero result
    ArmorBrokenNoSoak,
}
