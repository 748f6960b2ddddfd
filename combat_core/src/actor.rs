//! Actor - the typed combatant record the engine operates on

use crate::error::EngineError;
use crate::gear::{Armor, Weapon};
use crate::types::{ActorId, ActorKind, Characteristic};
use serde::{Deserialize, Serialize};

/// A bounded resource pool
///
/// Invariant: `0 <= value <= max`. Every mutating method clamps, so the
/// pool can neither overflow its maximum nor go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub value: u32,
    pub max: u32,
}

impl Pool {
    /// A pool starting at its maximum
    pub fn full(max: u32) -> Self {
        Pool { value: max, max }
    }

    /// Remove up to `amount`, floored at 0
    pub fn reduce(&mut self, amount: u32) {
        self.value = self.value.saturating_sub(amount);
    }

    /// Set the value, clamped to the maximum
    pub fn set(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    pub fn restore_to_max(&mut self) {
        self.value = self.max;
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// The four base attributes feeding dice pools
///
/// Values are non-negative reals; equipment and spell effects may leave
/// fractional values, but only the integer floor contributes dice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    pub might: f64,
    pub grace: f64,
    pub shell: f64,
    pub insight: f64,
}

impl Characteristics {
    pub fn get(&self, characteristic: Characteristic) -> f64 {
        match characteristic {
            Characteristic::Might => self.might,
            Characteristic::Grace => self.grace,
            Characteristic::Shell => self.shell,
            Characteristic::Insight => self.insight,
        }
    }

    /// Dice contributed to a pool: the integer floor, never negative
    pub fn dice_for(&self, characteristic: Characteristic) -> u32 {
        self.get(characteristic).max(0.0).floor() as u32
    }
}

/// A combatant: attributes, resource pools, and carried gear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub characteristics: Characteristics,
    pub hearts: Pool,
    pub soul: Pool,
    pub stamina: Pool,
    /// Ratio-based damage reduction applied last in the pipeline; 0 disables
    pub absorption: u32,
    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
}

impl Actor {
    /// Create a bare actor with empty pools and no gear
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Actor {
            id: id.into(),
            name: name.into(),
            kind: ActorKind::default(),
            characteristics: Characteristics::default(),
            hearts: Pool::full(0),
            soul: Pool::full(0),
            stamina: Pool::full(0),
            absorption: 0,
            weapons: Vec::new(),
            armor: Vec::new(),
        }
    }

    /// The armor the pipeline considers: first equipped, by convention
    pub fn active_armor(&self) -> Option<&Armor> {
        self.armor.iter().find(|a| a.equipped)
    }

    pub fn active_armor_mut(&mut self) -> Option<&mut Armor> {
        self.armor.iter_mut().find(|a| a.equipped)
    }

    /// Select the weapon for an attack
    ///
    /// With a name, the equipped weapon of that name must exist. Without
    /// one, selection only succeeds when a single weapon is equipped.
    pub fn select_weapon(&self, name: Option<&str>) -> Result<&Weapon, EngineError> {
        let equipped: Vec<&Weapon> = self.weapons.iter().filter(|w| w.equipped).collect();
        if equipped.is_empty() {
            return Err(EngineError::NoEquippedWeapons {
                actor: self.id.clone(),
            });
        }

        match name {
            Some(n) => equipped
                .into_iter()
                .find(|w| w.name == n)
                .ok_or(EngineError::WeaponNotSelected),
            None => match equipped.as_slice() {
                [only] => Ok(only),
                _ => Err(EngineError::WeaponNotSelected),
            },
        }
    }

    pub fn is_downed(&self) -> bool {
        self.hearts.is_empty()
    }
}
