//! Defense resolution - dodge, parry, soak, or an explicit pass

use crate::combat::record::{DefenseRoll, SoakRoll};
use crate::dice;
use crate::error::{EngineError, Warning};
use crate::event::EngineEvent;
use crate::session::CombatSession;
use crate::types::{ActorId, Characteristic, DefenseKind, RecordId};
use rand::Rng;

/// Resolve a defense choice using a thread-local RNG
pub fn resolve_defense(
    session: &mut CombatSession,
    defender: &ActorId,
    record_id: RecordId,
    kind: DefenseKind,
) -> Result<Option<Warning>, EngineError> {
    let mut rng = rand::thread_rng();
    resolve_defense_with_rng(session, defender, record_id, kind, &mut rng)
}

/// Resolve a defense choice with a provided RNG
///
/// Dodge and parry are actions and require the defender to hold the turn
/// while combat is active; soak is a passive armor check and an explicit
/// pass needs no roll at all. Each record slot accepts one result: a repeat
/// resolution of an occupied slot is a no-op without a roll.
///
/// Broken armor downgrades a soak to a zero result and reports
/// [`Warning::ArmorBrokenNoSoak`]; it is never an error.
pub fn resolve_defense_with_rng(
    session: &mut CombatSession,
    defender: &ActorId,
    record_id: RecordId,
    kind: DefenseKind,
    rng: &mut impl Rng,
) -> Result<Option<Warning>, EngineError> {
    // Only the recorded target may answer the attack
    let record = session.record(record_id)?;
    if record.target != *defender {
        return Err(EngineError::InvalidTarget {
            id: defender.clone(),
        });
    }

    let turn_bound = matches!(kind, DefenseKind::Dodge | DefenseKind::Parry);
    if turn_bound && session.turns.combat_active() && !session.turns.is_current(defender) {
        return Err(EngineError::NotYourTurn {
            actor: defender.clone(),
        });
    }

    // Attach-once guard, checked before any dice leave the cup
    let occupied = match kind {
        DefenseKind::Soak => record.soak.is_some(),
        _ => record.defense.is_some(),
    };
    if occupied {
        return Ok(None);
    }

    let mut warning = None;
    let successes = match kind {
        DefenseKind::Dodge | DefenseKind::Parry => {
            let characteristic = match kind {
                DefenseKind::Dodge => Characteristic::Grace,
                _ => Characteristic::Might,
            };
            let dice_count = session
                .actor(defender)?
                .characteristics
                .dice_for(characteristic);
            let roll = dice::roll_pool_with_rng(dice_count, 0, rng)?;
            let successes = roll.successes;
            session
                .record_mut(record_id)?
                .attach_defense(DefenseRoll { kind, successes });
            successes
        }
        DefenseKind::None => {
            session.record_mut(record_id)?.attach_defense(DefenseRoll {
                kind,
                successes: 0,
            });
            0
        }
        DefenseKind::Soak => {
            let actor = session.actor(defender)?;
            let soak = match actor.active_armor() {
                Some(armor) if armor.broken => {
                    warning = Some(Warning::ArmorBrokenNoSoak);
                    SoakRoll {
                        successes: 0,
                        damage_reduction: 0,
                        armor_name: Some(armor.name.clone()),
                    }
                }
                Some(armor) => {
                    let dice_count = actor.characteristics.dice_for(Characteristic::Shell)
                        + armor.soak_bonus;
                    let roll = dice::roll_pool_with_rng(dice_count, armor.soak_rerolls, rng)?;
                    SoakRoll {
                        successes: roll.successes,
                        damage_reduction: armor.damage_reduction,
                        armor_name: Some(armor.name.clone()),
                    }
                }
                None => SoakRoll {
                    successes: 0,
                    damage_reduction: 0,
                    armor_name: None,
                },
            };
            let successes = soak.successes;
            session.record_mut(record_id)?.attach_soak(soak);
            successes
        }
    };

    session.push_event(EngineEvent::DefenseChosen {
        record: record_id,
        defender: defender.clone(),
        kind,
        successes,
    });

    Ok(warning)
}
