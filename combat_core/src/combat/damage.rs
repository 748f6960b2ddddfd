//! Damage pipeline - the fixed reduction sequence from record to hearts

use crate::combat::record::AttackRecord;
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::session::CombatSession;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// Terminal outcome of one damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageOutcome {
    Miss,
    Hit,
}

/// Armor degradation recorded by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorBreakReport {
    pub armor_name: String,
    pub durability_after: u32,
    pub broken: bool,
}

/// Every intermediate quantity of one damage application
///
/// Produced for the presentation layer; the engine does no formatting
/// beyond the plain-text [`summary`](DamageReport::summary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub record: RecordId,
    pub attacker_name: String,
    pub target_name: String,
    pub weapon_name: String,
    pub outcome: DamageOutcome,

    // === Pipeline stages ===
    pub attack_successes: u32,
    pub defense_successes: u32,
    pub net_hits: u32,
    /// Cap on bonus damage: max(base damage, invested stamina)
    pub extra_damage_cap: u32,
    pub extra_damage: u32,
    pub probable_damage: u32,
    /// After the armor's flat reduction, floored at 1 on a nonzero hit
    pub after_reduction: u32,
    pub soak_successes: u32,
    pub after_soak: u32,
    pub absorption: u32,
    pub absorbed: u32,
    pub final_damage: u32,

    // === State changes ===
    pub hearts_before: u32,
    pub hearts_after: u32,
    pub armor_break: Option<ArmorBreakReport>,
}

impl DamageReport {
    fn miss(record: &AttackRecord, hearts: u32) -> Self {
        DamageReport {
            record: record.id,
            attacker_name: record.attacker_name.clone(),
            target_name: record.target_name.clone(),
            weapon_name: record.weapon.name.clone(),
            outcome: DamageOutcome::Miss,
            attack_successes: record.attack_successes,
            defense_successes: 0,
            net_hits: 0,
            extra_damage_cap: 0,
            extra_damage: 0,
            probable_damage: 0,
            after_reduction: 0,
            soak_successes: 0,
            after_soak: 0,
            absorption: 0,
            absorbed: 0,
            final_damage: 0,
            hearts_before: hearts,
            hearts_after: hearts,
            armor_break: None,
        }
    }

    /// Get a one-line summary string
    pub fn summary(&self) -> String {
        if self.outcome == DamageOutcome::Miss {
            return format!(
                "{} misses {} with {}",
                self.attacker_name, self.target_name, self.weapon_name
            );
        }

        let mut parts = vec![format!(
            "{} hits {} with {} for {} damage",
            self.attacker_name, self.target_name, self.weapon_name, self.final_damage
        )];

        if self.defense_successes > 0 {
            parts.push(format!("{} defended", self.defense_successes));
        }
        if self.soak_successes > 0 {
            parts.push(format!("{} soaked", self.soak_successes));
        }
        if self.absorbed > 0 {
            parts.push(format!("{} absorbed", self.absorbed));
        }
        if let Some(ref broken) = self.armor_break {
            if broken.broken {
                parts.push(format!("{} breaks!", broken.armor_name));
            } else {
                parts.push(format!("{} cracks", broken.armor_name));
            }
        }

        parts.join(", ")
    }
}

/// Apply a completed record to its target
///
/// The single place that mutates the target's hearts and triggers armor
/// degradation. Unset defense/soak slots count as zero, so a record still
/// awaiting a choice resolves as undefended.
///
/// Not idempotent: a second invocation double-applies. The embedding layer
/// must call this at most once per record.
pub fn apply_damage(
    session: &mut CombatSession,
    record_id: RecordId,
) -> Result<DamageReport, EngineError> {
    let record = session.record(record_id)?.clone();
    let target_hearts = session.actor(&record.target)?.hearts.value;

    // Step 1: a miss terminates the pipeline
    if !record.hit {
        let report = DamageReport::miss(&record, target_hearts);
        session.push_event(EngineEvent::DamageApplied {
            record: record_id,
            target: record.target.clone(),
            final_damage: 0,
        });
        return Ok(report);
    }

    // Steps 2-3: net hits over the attached defense
    let defense_successes = record.defense_successes();
    let net_hits = record.attack_successes.saturating_sub(defense_successes);

    // Steps 4-6: bonus damage from excess successes, capped by the larger
    // of base damage and investment
    let extra_damage_cap = record.weapon.base_damage.max(record.invested_stamina);
    let extra_damage = net_hits.min(extra_damage_cap);
    let probable_damage = record.weapon.base_damage + extra_damage;

    // Step 7: flat armor reduction; a nonzero hit never drops below 1 here
    let reduction = record.soak_reduction();
    let after_reduction = if probable_damage > 0 && reduction > 0 {
        probable_damage.saturating_sub(reduction).max(1)
    } else {
        probable_damage
    };

    // Step 8: soak successes subtract directly
    let soak_successes = record.soak_successes();
    let after_soak = after_reduction.saturating_sub(soak_successes);

    // Step 9: ratio-based absorption, applied last
    let absorption = session.actor(&record.target)?.absorption;
    let (absorbed, final_damage) = if after_soak > 0 && absorption > 0 {
        let reduced_by = 1 + after_soak / absorption;
        (reduced_by.min(after_soak), after_soak.saturating_sub(reduced_by))
    } else {
        (0, after_soak)
    };

    // Step 10: hearts
    let target = session.actor_mut(&record.target)?;
    let hearts_before = target.hearts.value;
    if final_damage > 0 {
        target.hearts.reduce(final_damage);
    }
    let hearts_after = target.hearts.value;

    // Step 11: a critical six on a hit degrades armor, whether or not any
    // damage got through
    let armor_break = if record.has_critical_six && record.hit {
        session
            .actor_mut(&record.target)?
            .active_armor_mut()
            .and_then(|armor| {
                if armor.apply_break_trigger() {
                    Some(ArmorBreakReport {
                        armor_name: armor.name.clone(),
                        durability_after: armor.durability.value,
                        broken: armor.broken,
                    })
                } else {
                    None
                }
            })
    } else {
        None
    };

    // Step 12: report for the presentation layer
    let report = DamageReport {
        record: record_id,
        attacker_name: record.attacker_name.clone(),
        target_name: record.target_name.clone(),
        weapon_name: record.weapon.name.clone(),
        outcome: DamageOutcome::Hit,
        attack_successes: record.attack_successes,
        defense_successes,
        net_hits,
        extra_damage_cap,
        extra_damage,
        probable_damage,
        after_reduction,
        soak_successes,
        after_soak,
        absorption,
        absorbed,
        final_damage,
        hearts_before,
        hearts_after,
        armor_break,
    };
    session.push_event(EngineEvent::DamageApplied {
        record: record_id,
        target: record.target.clone(),
        final_damage,
    });

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, Pool};
    use crate::combat::record::{DefenseRoll, SoakRoll};
    use crate::gear::{Armor, WeaponSnapshot};
    use crate::types::{ActorId, DefenseKind, RangeCategory};

    struct Fixture {
        session: CombatSession,
        target: ActorId,
        record_id: RecordId,
    }

    /// Build a session holding one hand-crafted record against a target
    fn fixture(build: impl FnOnce(&mut AttackRecord, &mut Actor)) -> Fixture {
        let mut session = CombatSession::new();

        let knight = Actor::new("knight", "Knight");
        let mut moth = Actor::new("moth", "Moth");
        moth.hearts = Pool::full(10);

        let mut record = AttackRecord {
            id: RecordId(0),
            attacker: knight.id.clone(),
            attacker_name: knight.name.clone(),
            target: moth.id.clone(),
            target_name: moth.name.clone(),
            weapon: WeaponSnapshot {
                name: "Nail".to_string(),
                quality: 1,
                range: RangeCategory::Melee,
                base_damage: 2,
                rerolls: 0,
            },
            invested_stamina: 3,
            stamina_tax: 0,
            total_cost: 3,
            attack_successes: 4,
            faces: vec![5, 5, 6, 5, 1, 2],
            has_critical_six: false,
            hit: true,
            defense: None,
            soak: None,
        };

        build(&mut record, &mut moth);
        record.hit = record.attack_successes > 0;

        let target = moth.id.clone();
        session.add_actor(knight);
        session.add_actor(moth);
        session.push_record(record);

        Fixture {
            session,
            target,
            record_id: RecordId(0),
        }
    }

    #[test]
    fn test_full_reduction_sequence() {
        // base 2, invested 3, 4 successes vs 1 defense, reduction 1,
        // 2 soaked, absorption 3
        let mut f = fixture(|record, moth| {
            record.attach_defense(DefenseRoll {
                kind: DefenseKind::Dodge,
                successes: 1,
            });
            record.attach_soak(SoakRoll {
                successes: 2,
                damage_reduction: 1,
                armor_name: Some("Shell Plate".to_string()),
            });
            moth.absorption = 3;
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.net_hits, 3);
        assert_eq!(report.extra_damage_cap, 3);
        assert_eq!(report.extra_damage, 3);
        assert_eq!(report.probable_damage, 5);
        assert_eq!(report.after_reduction, 4);
        assert_eq!(report.after_soak, 2);
        assert_eq!(report.absorbed, 1);
        assert_eq!(report.final_damage, 1);
        assert_eq!(f.session.actor(&f.target).unwrap().hearts.value, 9);
    }

    #[test]
    fn test_miss_reports_and_leaves_hearts_alone() {
        let mut f = fixture(|record, _| {
            record.attack_successes = 0;
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.outcome, DamageOutcome::Miss);
        assert_eq!(report.final_damage, 0);
        assert_eq!(f.session.actor(&f.target).unwrap().hearts.value, 10);
        assert!(report.summary().contains("misses"));
    }

    #[test]
    fn test_unset_slots_count_as_zero() {
        let mut f = fixture(|_, _| {});

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        // net 4, cap max(2,3)=3, probable 2+3=5, no reduction or soak
        assert_eq!(report.defense_successes, 0);
        assert_eq!(report.soak_successes, 0);
        assert_eq!(report.final_damage, 5);
    }

    #[test]
    fn test_flat_reduction_never_negates_a_nonzero_hit() {
        let mut f = fixture(|record, _| {
            record.weapon.base_damage = 1;
            record.invested_stamina = 1;
            record.attack_successes = 1;
            record.attach_defense(DefenseRoll {
                kind: DefenseKind::None,
                successes: 1,
            });
            record.attach_soak(SoakRoll {
                successes: 0,
                damage_reduction: 5,
                armor_name: Some("Shell Plate".to_string()),
            });
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        // probable 1, reduction 5 still leaves 1
        assert_eq!(report.probable_damage, 1);
        assert_eq!(report.after_reduction, 1);
        assert_eq!(report.final_damage, 1);
    }

    #[test]
    fn test_soak_can_zero_the_damage() {
        let mut f = fixture(|record, _| {
            record.attach_soak(SoakRoll {
                successes: 9,
                damage_reduction: 0,
                armor_name: Some("Shell Plate".to_string()),
            });
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.after_soak, 0);
        assert_eq!(report.absorbed, 0);
        assert_eq!(report.final_damage, 0);
        assert_eq!(f.session.actor(&f.target).unwrap().hearts.value, 10);
    }

    #[test]
    fn test_hearts_floor_at_zero() {
        let mut f = fixture(|record, moth| {
            moth.hearts = Pool::full(2);
            record.attack_successes = 6;
        });

        apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(f.session.actor(&f.target).unwrap().hearts.value, 0);
        assert!(f.session.actor(&f.target).unwrap().is_downed());
    }

    #[test]
    fn test_critical_six_breaks_armor_even_when_nothing_gets_through() {
        let mut f = fixture(|record, moth| {
            record.has_critical_six = true;
            record.attach_soak(SoakRoll {
                successes: 9,
                damage_reduction: 0,
                armor_name: Some("Shell Plate".to_string()),
            });
            moth.armor.push(Armor {
                name: "Shell Plate".to_string(),
                durability: Pool::full(1),
                broken: false,
                soak_bonus: 0,
                soak_rerolls: 0,
                damage_reduction: 0,
                equipped: true,
            });
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.final_damage, 0);
        let broken = report.armor_break.unwrap();
        assert!(broken.broken);
        assert_eq!(broken.durability_after, 0);
        let armor = &f.session.actor(&f.target).unwrap().armor[0];
        assert!(armor.broken);
        assert_eq!(armor.durability.value, 0);
    }

    #[test]
    fn test_no_break_trigger_without_a_critical() {
        let mut f = fixture(|_, moth| {
            moth.armor.push(Armor {
                name: "Shell Plate".to_string(),
                durability: Pool::full(2),
                broken: false,
                soak_bonus: 0,
                soak_rerolls: 0,
                damage_reduction: 0,
                equipped: true,
            });
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.armor_break, None);
        assert_eq!(
            f.session.actor(&f.target).unwrap().armor[0].durability.value,
            2
        );
    }

    #[test]
    fn test_absorption_inactive_at_zero() {
        let mut f = fixture(|_, moth| {
            moth.absorption = 0;
        });

        let report = apply_damage(&mut f.session, f.record_id).unwrap();

        assert_eq!(report.absorbed, 0);
        assert_eq!(report.final_damage, report.after_soak);
    }

    #[test]
    fn test_summary_names_the_parties() {
        let mut f = fixture(|_, _| {});
        let report = apply_damage(&mut f.session, f.record_id).unwrap();
        let summary = report.summary();
        assert!(summary.contains("Knight"));
        assert!(summary.contains("Moth"));
        assert!(summary.contains("Nail"));
    }
}
