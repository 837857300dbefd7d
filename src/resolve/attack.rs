//! Attack validation and resolution.
//!
//! An attack is checked in a fixed order: self-attack, slot lookup,
//! alliance, then troop minimum. Dice are drawn only after every check
//! passes, so a rejected attack neither mutates the registry nor advances
//! the random source.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::dice::{is_face, Rolls};
use crate::board::{Faction, Registry, RegistryError};

/// Minimum troops a territory needs to launch an attack.
pub const MIN_ATTACK_TROOPS: u32 = 2;

/// What an attacker win does to the defending territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackRule {
    /// The defender loses one troop; ownership never changes.
    #[default]
    Attrition,
    /// The defender switches to the attacker's faction and receives half
    /// of the attacker's troops, which leave the attacker.
    Conquest,
}

impl AttackRule {
    /// Parses a rule from its lowercase name.
    pub fn from_name(s: &str) -> Option<AttackRule> {
        match s.to_ascii_lowercase().as_str() {
            "attrition" => Some(AttackRule::Attrition),
            "conquest" => Some(AttackRule::Conquest),
            _ => None,
        }
    }
}

/// Which side won an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Attacker,
    Defender,
}

/// Result of a resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: usize,
    pub defender: usize,
    pub attack_roll: u8,
    pub defend_roll: u8,
    pub winner: Winner,
    /// Attacker troops after the attack.
    pub attacker_troops: u32,
    /// Defender troops after the attack.
    pub defender_troops: u32,
    /// Set when the defender changed faction (conquest rule only).
    pub conquered: bool,
}

/// Reasons an attack is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("territory {0} cannot attack itself")]
    SelfAttack(usize),

    #[error("cannot attack a territory of the same faction '{0}'")]
    Alliance(Faction),

    #[error("the attacking territory needs at least 2 troops (has {0})")]
    InsufficientTroops(u32),

    #[error("roll {0} is not a face of a six-sided die")]
    InvalidRoll(u8),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Checks every precondition of an attack without touching any state.
pub fn validate_attack(
    registry: &Registry,
    attacker: usize,
    defender: usize,
) -> Result<(), AttackError> {
    if attacker == defender {
        return Err(AttackError::SelfAttack(attacker));
    }

    let atk = registry.get(attacker)?;
    let def = registry.get(defender)?;

    if atk.is_allied_with(def) {
        return Err(AttackError::Alliance(atk.faction.clone()));
    }
    if atk.troops < MIN_ATTACK_TROOPS {
        return Err(AttackError::InsufficientTroops(atk.troops));
    }
    Ok(())
}

/// Validates an attack, rolls the dice, and applies the result.
pub fn resolve_attack<R: Rng + ?Sized>(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rng: &mut R,
    rule: AttackRule,
) -> Result<AttackOutcome, AttackError> {
    validate_attack(registry, attacker, defender)?;
    let rolls = Rolls::draw(rng);
    apply(registry, attacker, defender, rolls, rule)
}

/// Validates an attack and applies a given pair of rolls.
///
/// Used to replay a recorded attack; the rolls must be die faces.
pub fn resolve_with_rolls(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rolls: Rolls,
    rule: AttackRule,
) -> Result<AttackOutcome, AttackError> {
    for value in [rolls.attack, rolls.defend] {
        if !is_face(value) {
            return Err(AttackError::InvalidRoll(value));
        }
    }
    validate_attack(registry, attacker, defender)?;
    apply(registry, attacker, defender, rolls, rule)
}

/// Mutates both territories according to `rolls`. Preconditions must hold.
fn apply(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rolls: Rolls,
    rule: AttackRule,
) -> Result<AttackOutcome, AttackError> {
    let (atk, def) = registry.get_pair_mut(attacker, defender)?;

    let winner = if rolls.attacker_wins() {
        Winner::Attacker
    } else {
        Winner::Defender
    };

    let mut conquered = false;
    match (winner, rule) {
        (Winner::Attacker, AttackRule::Attrition) => def.lose_troop(),
        (Winner::Attacker, AttackRule::Conquest) => {
            let moved = atk.troops / 2;
            atk.troops -= moved;
            def.troops = moved;
            def.faction = atk.faction.clone();
            conquered = true;
        }
        (Winner::Defender, _) => atk.lose_troop(),
    }

    tracing::debug!(
        attacker = %atk.name,
        defender = %def.name,
        attack_roll = rolls.attack,
        defend_roll = rolls.defend,
        ?winner,
        conquered,
        "attack resolved"
    );

    Ok(AttackOutcome {
        attacker,
        defender,
        attack_roll: rolls.attack,
        defend_roll: rolls.defend,
        winner,
        attacker_troops: atk.troops,
        defender_troops: def.troops,
        conquered,
    })
}
