//! Attack resolution - validation, cost, roll, archived record

use crate::combat::record::AttackRecord;
use crate::dice;
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::resource;
use crate::session::CombatSession;
use crate::types::{ActorId, PoolKind, RecordId};
use rand::Rng;

/// Declare an attack using a thread-local RNG
pub fn declare_attack(
    session: &mut CombatSession,
    attacker: &ActorId,
    weapon_name: Option<&str>,
    targets: &[ActorId],
    invested_stamina: u32,
) -> Result<RecordId, EngineError> {
    let mut rng = rand::thread_rng();
    declare_attack_with_rng(session, attacker, weapon_name, targets, invested_stamina, &mut rng)
}

/// Declare an attack with a provided RNG
///
/// Validation completes before the stamina spend, and the spend completes
/// before the tax increment; a failure at any step leaves no mutation. The
/// cost uses the tax as it stood before this attack - the increment only
/// surcharges the attacker's next attack this turn.
pub fn declare_attack_with_rng(
    session: &mut CombatSession,
    attacker: &ActorId,
    weapon_name: Option<&str>,
    targets: &[ActorId],
    invested_stamina: u32,
    rng: &mut impl Rng,
) -> Result<RecordId, EngineError> {
    // Step 1: outside their turn, an active combatant cannot attack
    if session.turns.combat_active() && !session.turns.is_current(attacker) {
        return Err(EngineError::NotYourTurn {
            actor: attacker.clone(),
        });
    }

    // Step 2: exactly one designated target, and it must resolve
    let target = match targets {
        [one] => one.clone(),
        _ => return Err(EngineError::NeedOneTarget),
    };
    let target_name = session.actor(&target)?.name.clone();

    // Step 3: minimum investment
    if invested_stamina == 0 {
        return Err(EngineError::AttackMinStamina);
    }

    let attacker_ref = session.actor(attacker)?;
    let attacker_name = attacker_ref.name.clone();
    let weapon = attacker_ref.select_weapon(weapon_name)?.snapshot();

    // Steps 6-7: pool size from the range-matched characteristic, frozen
    // before any mutation
    let characteristic = weapon.range.attack_characteristic();
    let characteristic_dice = attacker_ref.characteristics.dice_for(characteristic);
    let dice_count = characteristic_dice + weapon.quality + invested_stamina;

    // Steps 4-5: the cost is investment plus the tax as it stands now;
    // paying it is the first mutation
    let stamina_tax = session.turns.current_tax(attacker);
    let total_cost = invested_stamina + stamina_tax;
    resource::spend(session.actor_mut(attacker)?, PoolKind::Stamina, total_cost)?;

    // Steps 8-9: roll; invested_stamina >= 1 keeps the pool non-empty
    let roll = dice::roll_pool_with_rng(dice_count, weapon.rerolls, rng)?;
    let has_critical_six = roll.has_critical();
    let hit = roll.successes > 0;

    // Step 10: tax now applies to the attacker's next attack this turn
    session.turns.register_attack(attacker);

    // Step 11: archive the transaction
    let id = session.next_record_id();
    let record = AttackRecord {
        id,
        attacker: attacker.clone(),
        attacker_name,
        target: target.clone(),
        target_name,
        weapon,
        invested_stamina,
        stamina_tax,
        total_cost,
        attack_successes: roll.successes,
        faces: roll.faces,
        has_critical_six,
        hit,
        defense: None,
        soak: None,
    };
    let successes = record.attack_successes;
    session.push_record(record);
    session.push_event(EngineEvent::AttackDeclared {
        record: id,
        attacker: attacker.clone(),
        target,
        successes,
        hit,
    });

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, Pool};
    use crate::gear::Weapon;
    use crate::types::RangeCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nail() -> Weapon {
        Weapon {
            name: "Nail".to_string(),
            quality: 1,
            range: RangeCategory::Melee,
            range_distance: 1,
            base_damage: 2,
            rerolls: 0,
            initiative_bonus: 0,
            equipped: true,
        }
    }

    fn needle_bow() -> Weapon {
        Weapon {
            name: "Needle Bow".to_string(),
            quality: 0,
            range: RangeCategory::Ranged,
            range_distance: 12,
            base_damage: 1,
            rerolls: 0,
            initiative_bonus: 0,
            equipped: true,
        }
    }

    fn duel_session() -> (CombatSession, ActorId, ActorId) {
        let mut session = CombatSession::new();

        let mut knight = Actor::new("knight", "Knight");
        knight.characteristics.might = 3.0;
        knight.characteristics.grace = 2.0;
        knight.stamina = Pool::full(10);
        knight.hearts = Pool::full(5);
        knight.weapons.push(nail());
        let knight_id = knight.id.clone();

        let mut moth = Actor::new("moth", "Moth");
        moth.hearts = Pool::full(4);
        moth.stamina = Pool::full(6);
        let moth_id = moth.id.clone();

        session.add_actor(knight);
        session.add_actor(moth);
        (session, knight_id, moth_id)
    }

    #[test]
    fn test_pool_is_characteristic_plus_quality_plus_investment() {
        let (mut session, knight, moth) = duel_session();
        let mut rng = StdRng::seed_from_u64(7);

        let id = declare_attack_with_rng(
            &mut session,
            &knight,
            None,
            &[moth.clone()],
            2,
            &mut rng,
        )
        .unwrap();

        let record = session.record(id).unwrap();
        // might 3 + quality 1 + invested 2
        assert_eq!(record.faces.len(), 6);
        assert_eq!(record.total_cost, 2);
        assert_eq!(record.hit, record.attack_successes > 0);
        assert_eq!(session.actor(&knight).unwrap().stamina.value, 8);
    }

    #[test]
    fn test_ranged_weapon_rolls_on_grace() {
        let (mut session, knight, moth) = duel_session();
        session.actor_mut(&knight).unwrap().weapons = vec![needle_bow()];
        let mut rng = StdRng::seed_from_u64(7);

        let id = declare_attack_with_rng(
            &mut session,
            &knight,
            None,
            &[moth.clone()],
            1,
            &mut rng,
        )
        .unwrap();

        // grace 2 + quality 0 + invested 1
        assert_eq!(session.record(id).unwrap().faces.len(), 3);
    }

    #[test]
    fn test_repeat_attacks_pay_the_escalating_tax() {
        let (mut session, knight, moth) = duel_session();
        session.turn_changed(None, &knight).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for (attack_index, expected_cost) in [(0u64, 2u32), (1, 3), (2, 4)] {
            let before = session.actor(&knight).unwrap().stamina.value;
            let id = declare_attack_with_rng(
                &mut session,
                &knight,
                None,
                &[moth.clone()],
                2,
                &mut rng,
            )
            .unwrap();
            let record = session.record(id).unwrap();

            assert_eq!(record.id, RecordId(attack_index));
            assert_eq!(record.stamina_tax, expected_cost - 2);
            assert_eq!(record.total_cost, expected_cost);
            assert_eq!(
                session.actor(&knight).unwrap().stamina.value,
                before - expected_cost
            );
        }
    }

    #[test]
    fn test_not_your_turn() {
        let (mut session, knight, moth) = duel_session();
        session.turn_changed(None, &moth).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let result =
            declare_attack_with_rng(&mut session, &knight, None, &[moth.clone()], 1, &mut rng);
        assert_eq!(
            result,
            Err(EngineError::NotYourTurn {
                actor: knight.clone()
            })
        );
        assert_eq!(session.actor(&knight).unwrap().stamina.value, 10);
    }

    #[test]
    fn test_target_cardinality_must_be_one() {
        let (mut session, knight, moth) = duel_session();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            declare_attack_with_rng(&mut session, &knight, None, &[], 1, &mut rng),
            Err(EngineError::NeedOneTarget)
        );
        assert_eq!(
            declare_attack_with_rng(
                &mut session,
                &knight,
                None,
                &[moth.clone(), knight.clone()],
                1,
                &mut rng,
            ),
            Err(EngineError::NeedOneTarget)
        );
    }

    #[test]
    fn test_unresolvable_target() {
        let (mut session, knight, _) = duel_session();
        let mut rng = StdRng::seed_from_u64(7);
        let ghost: ActorId = "ghost".into();

        assert_eq!(
            declare_attack_with_rng(&mut session, &knight, None, &[ghost.clone()], 1, &mut rng),
            Err(EngineError::InvalidTarget { id: ghost })
        );
    }

    #[test]
    fn test_zero_investment_is_rejected() {
        let (mut session, knight, moth) = duel_session();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            declare_attack_with_rng(&mut session, &knight, None, &[moth.clone()], 0, &mut rng),
            Err(EngineError::AttackMinStamina)
        );
    }

    #[test]
    fn test_insufficient_stamina_leaves_everything_unchanged() {
        let (mut session, knight, moth) = duel_session();
        session.actor_mut(&knight).unwrap().stamina.set(1);
        let mut rng = StdRng::seed_from_u64(7);

        let result =
            declare_attack_with_rng(&mut session, &knight, None, &[moth.clone()], 2, &mut rng);

        assert_eq!(
            result,
            Err(EngineError::InsufficientResource {
                pool: PoolKind::Stamina,
                need: 2,
                have: 1,
            })
        );
        assert_eq!(session.actor(&knight).unwrap().stamina.value, 1);
        assert_eq!(session.turns.current_tax(&knight), 0);
        assert!(session.records().is_empty());
    }

    #[test]
    fn test_weapon_selection_errors() {
        let (mut session, knight, moth) = duel_session();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            declare_attack_with_rng(
                &mut session,
                &knight,
                Some("Claw"),
                &[moth.clone()],
                1,
                &mut rng,
            ),
            Err(EngineError::WeaponNotSelected)
        );

        session.actor_mut(&knight).unwrap().weapons.clear();
        assert_eq!(
            declare_attack_with_rng(&mut session, &knight, None, &[moth.clone()], 1, &mut rng),
            Err(EngineError::NoEquippedWeapons {
                actor: knight.clone()
            })
        );
    }
}
