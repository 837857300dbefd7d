//! Conflict resolution.
//!
//! Validates and resolves attacks between territories and evaluates
//! mission predicates over the registry.

pub mod attack;
pub mod dice;
pub mod mission;

pub use attack::{
    resolve_attack, resolve_with_rolls, validate_attack, AttackError, AttackOutcome, AttackRule,
    Winner, MIN_ATTACK_TROOPS,
};
pub use dice::Rolls;
pub use mission::{check_victory, sample_mission, Mission, MissionError};

use rand::Rng;

use crate::board::Registry;

/// Stateless entry point bundling the resolver operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    /// See [`attack::resolve_attack`].
    pub fn resolve_attack<R: Rng + ?Sized>(
        registry: &mut Registry,
        attacker: usize,
        defender: usize,
        rng: &mut R,
        rule: AttackRule,
    ) -> Result<AttackOutcome, AttackError> {
        attack::resolve_attack(registry, attacker, defender, rng, rule)
    }

    /// See [`mission::sample_mission`].
    pub fn sample_mission<R: Rng + ?Sized>(
        registry: &Registry,
        rng: &mut R,
    ) -> Result<Mission, MissionError> {
        mission::sample_mission(registry, rng)
    }

    /// See [`mission::check_victory`].
    pub fn check_victory(registry: &Registry, mission: &Mission) -> bool {
        mission::check_victory(registry, mission)
    }
}
