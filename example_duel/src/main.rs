//! Example Duel - a scripted encounter demonstrating combat_core
//!
//! This demo plays the roles the engine leaves to its collaborators:
//! - turn order: alternating turns between two duelists
//! - player choice: a fixed defense script (dodge when able, always soak)
//! - presentation: plain stdout summaries plus the drained event stream
//!
//! The RNG is seeded, so repeated runs tell the same story.

use combat_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ROSTER: &str = include_str!("../assets/duel.toml");
const MAX_ROUNDS: u32 = 6;

struct Duel {
    session: CombatSession,
    rng: ChaCha8Rng,
    /// Attacks declared last turn, still awaiting the defender's answer
    pending: Vec<RecordId>,
}

impl Duel {
    fn new(session: CombatSession) -> Self {
        Duel {
            session,
            rng: ChaCha8Rng::seed_from_u64(4242),
            pending: Vec::new(),
        }
    }

    /// Answer the attacks declared against `actor`, then strike back
    fn take_turn(&mut self, actor: &ActorId, foe: &ActorId, invested: u32) {
        self.session
            .turn_changed(Some(foe), actor)
            .expect("roster actor");

        // Resolve what's hanging over this duelist first
        for record_id in std::mem::take(&mut self.pending) {
            self.defend(actor, record_id);
            match apply_damage(&mut self.session, record_id) {
                Ok(report) => println!("  {}", report.summary()),
                Err(err) => println!("  damage aborted: {err}"),
            }
        }

        if self.session.actor(actor).map_or(true, |a| a.is_downed()) {
            return;
        }

        // Two swings: the second demonstrates the escalating tax
        for _ in 0..2 {
            match declare_attack_with_rng(
                &mut self.session,
                actor,
                None,
                &[foe.clone()],
                invested,
                &mut self.rng,
            ) {
                Ok(record_id) => {
                    let record = self.session.record(record_id).expect("archived record");
                    println!(
                        "  {} invests {} (+{} tax), rolls {:?}: {} successes",
                        record.attacker_name,
                        record.invested_stamina,
                        record.stamina_tax,
                        record.faces,
                        record.attack_successes,
                    );
                    self.pending.push(record_id);
                }
                Err(err) => {
                    println!("  attack fails: {err}");
                    break;
                }
            }
        }
    }

    fn defend(&mut self, defender: &ActorId, record_id: RecordId) {
        for kind in [DefenseKind::Dodge, DefenseKind::Soak] {
            match resolve_defense_with_rng(
                &mut self.session,
                defender,
                record_id,
                kind,
                &mut self.rng,
            ) {
                Ok(Some(Warning::ArmorBrokenNoSoak)) => {
                    println!("  (broken armor gives no soak)")
                }
                Ok(None) => {}
                Err(err) => println!("  {kind} not possible: {err}"),
            }
        }
    }

    fn loser(&self) -> Option<&Actor> {
        self.session
            .records()
            .iter()
            .map(|r| &r.target)
            .chain(self.session.records().iter().map(|r| &r.attacker))
            .filter_map(|id| self.session.actor(id).ok())
            .find(|a| a.is_downed())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let roster: RosterConfig = parse_toml(ROSTER)?;
    let mut session = CombatSession::new();
    for actor in roster.into_actors()? {
        println!(
            "{} enters: {} hearts, {} stamina",
            actor.name, actor.hearts.max, actor.stamina.max
        );
        session.add_actor(actor);
    }

    let knight: ActorId = "knight".into();
    let sentinel: ActorId = "sentinel".into();
    let mut duel = Duel::new(session);

    for round in 1..=MAX_ROUNDS {
        println!("\n--- Round {round} ---");
        duel.take_turn(&knight, &sentinel, 2);
        if duel.loser().is_some() {
            break;
        }
        duel.take_turn(&sentinel, &knight, 1);
        if duel.loser().is_some() {
            break;
        }
    }

    match duel.loser() {
        Some(actor) => println!("\n{} is downed!", actor.name),
        None => println!("\nBoth duelists are still standing."),
    }
    duel.session.end_combat();

    // What a presentation layer would consume
    println!("\nEvent stream:");
    for event in duel.session.drain_events() {
        println!("  {event:?}");
    }

    if let Some(last) = duel.session.records().last() {
        println!("\nLast archived record:");
        println!("{}", serde_json::to_string_pretty(last)?);
    }

    Ok(())
}
