//! Resource ledger - validated spends and restores on actor pools

use crate::actor::{Actor, Pool};
use crate::error::EngineError;
use crate::types::PoolKind;

/// Read access to one of an actor's pools
pub fn pool(actor: &Actor, kind: PoolKind) -> &Pool {
    match kind {
        PoolKind::Hearts => &actor.hearts,
        PoolKind::Soul => &actor.soul,
        PoolKind::Stamina => &actor.stamina,
    }
}

pub fn pool_mut(actor: &mut Actor, kind: PoolKind) -> &mut Pool {
    match kind {
        PoolKind::Hearts => &mut actor.hearts,
        PoolKind::Soul => &mut actor.soul,
        PoolKind::Stamina => &mut actor.stamina,
    }
}

/// Spend `amount` from a pool
///
/// A zero amount trivially succeeds. Insufficiency fails with the needed
/// and available quantities, and the pool is left untouched.
pub fn spend(actor: &mut Actor, kind: PoolKind, amount: u32) -> Result<(), EngineError> {
    if amount == 0 {
        return Ok(());
    }

    let have = pool(actor, kind).value;
    if have < amount {
        return Err(EngineError::InsufficientResource {
            pool: kind,
            need: amount,
            have,
        });
    }

    pool_mut(actor, kind).value = have - amount;
    Ok(())
}

/// Refill a pool to its maximum (stamina at turn start, healing effects)
pub fn restore_to_max(actor: &mut Actor, kind: PoolKind) {
    pool_mut(actor, kind).restore_to_max();
}
