//! Six-sided dice drawn from an injected random source.

use rand::Rng;

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// A pair of rolls for one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rolls {
    pub attack: u8,
    pub defend: u8,
}

impl Rolls {
    pub fn new(attack: u8, defend: u8) -> Self {
        Rolls { attack, defend }
    }

    /// Draws the attack roll, then the defense roll.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let attack = roll(rng);
        let defend = roll(rng);
        Rolls { attack, defend }
    }

    /// The attacker wins only on a strictly higher roll.
    pub fn attacker_wins(self) -> bool {
        self.attack > self.defend
    }
}

/// Draws one die, uniform in `1..=6`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}

/// Returns true if `value` is a face of a six-sided die.
pub fn is_face(value: u8) -> bool {
    (1..=DIE_FACES).contains(&value)
}
