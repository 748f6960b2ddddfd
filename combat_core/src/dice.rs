//! Dice pools - d6 success counting with bounded reroll-of-failures

use crate::actor::Actor;
use crate::error::EngineError;
use crate::types::Characteristic;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the system die
pub const DIE_FACES: u8 = 6;
/// A die counts as a success on this face or higher
pub const SUCCESS_THRESHOLD: u8 = 5;
/// The face that marks a critical result
pub const CRITICAL_FACE: u8 = 6;

/// Final state of an evaluated dice pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Count of faces at or above [`SUCCESS_THRESHOLD`]
    pub successes: u32,
    /// Final face values, in rolled order, kept for auditability
    pub faces: Vec<u8>,
}

impl RollOutcome {
    /// Whether any die shows the critical face
    pub fn has_critical(&self) -> bool {
        self.faces.iter().any(|&f| f == CRITICAL_FACE)
    }
}

/// Outcome of a standalone characteristic check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub characteristic: Characteristic,
    /// Pool size after the modifier, floored at 0
    pub dice_count: u32,
    pub roll: RollOutcome,
}

fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}

fn count_successes(faces: &[u8]) -> u32 {
    faces.iter().filter(|&&f| f >= SUCCESS_THRESHOLD).count() as u32
}

/// Re-draw up to `rerolls` failed dice, in their original positional order.
///
/// Each selected die is replaced exactly once; the new face is final even
/// when it fails again. Returns how many dice were actually rerolled.
pub(crate) fn apply_rerolls(faces: &mut [u8], rerolls: u32, rng: &mut impl Rng) -> u32 {
    let mut rerolled = 0;
    for face in faces.iter_mut() {
        if rerolled == rerolls {
            break;
        }
        if *face < SUCCESS_THRESHOLD {
            *face = roll_die(rng);
            rerolled += 1;
        }
    }
    rerolled
}

/// Evaluate a pool of `dice_count` d6 using a thread-local RNG
pub fn roll_pool(dice_count: u32, rerolls: u32) -> Result<RollOutcome, EngineError> {
    let mut rng = rand::thread_rng();
    roll_pool_with_rng(dice_count, rerolls, &mut rng)
}

/// Evaluate a pool with a provided RNG (for deterministic testing)
///
/// Each die is an independent uniform draw; faces of 5+ count as successes.
/// An empty pool is a user-facing error, not a zero result.
pub fn roll_pool_with_rng(
    dice_count: u32,
    rerolls: u32,
    rng: &mut impl Rng,
) -> Result<RollOutcome, EngineError> {
    if dice_count == 0 {
        return Err(EngineError::NoDice);
    }

    let mut faces: Vec<u8> = (0..dice_count).map(|_| roll_die(rng)).collect();
    apply_rerolls(&mut faces, rerolls, rng);

    Ok(RollOutcome {
        successes: count_successes(&faces),
        faces,
    })
}

/// Roll a standalone characteristic check using a thread-local RNG
pub fn characteristic_check(
    actor: &Actor,
    characteristic: Characteristic,
    modifier: i32,
    rerolls: u32,
) -> Result<CheckOutcome, EngineError> {
    let mut rng = rand::thread_rng();
    characteristic_check_with_rng(actor, characteristic, modifier, rerolls, &mut rng)
}

/// Roll a characteristic check with a provided RNG
///
/// The pool is the characteristic's floor plus the modifier, floored at 0;
/// an empty pool fails like any other roll.
pub fn characteristic_check_with_rng(
    actor: &Actor,
    characteristic: Characteristic,
    modifier: i32,
    rerolls: u32,
    rng: &mut impl Rng,
) -> Result<CheckOutcome, EngineError> {
    let base = actor.characteristics.dice_for(characteristic) as i64;
    let dice_count = (base + modifier as i64).max(0) as u32;
    let roll = roll_pool_with_rng(dice_count, rerolls, rng)?;

    Ok(CheckOutcome {
        characteristic,
        dice_count,
        roll,
    })
}
