//! Property tests for attack resolution and missions.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use conquest::board::{Faction, LabelPolicy, Registry};
use conquest::resolve::{
    check_victory, resolve_attack, resolve_with_rolls, AttackError, AttackRule, Mission, Rolls,
    Winner,
};

const FACTIONS: [&str; 3] = ["Red", "Blue", "Green"];

fn rule_strategy() -> impl Strategy<Value = AttackRule> {
    prop_oneof![Just(AttackRule::Attrition), Just(AttackRule::Conquest)]
}

/// A populated board of 2..8 territories with small troop counts.
fn board_strategy() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0..FACTIONS.len(), 0i64..6), 2..8)
}

fn build(board: &[(usize, i64)]) -> Registry {
    let mut reg = Registry::create(board.len() as i64).unwrap();
    for (i, (faction, troops)) in board.iter().enumerate() {
        reg.set(i + 1, &format!("T{}", i + 1), FACTIONS[*faction], *troops)
            .unwrap();
    }
    reg
}

proptest! {
    #[test]
    fn random_attack_sequences_keep_the_board_consistent(
        board in board_strategy(),
        picks in prop::collection::vec((0usize..8, 0usize..8), 0..60),
        seed in any::<u64>(),
        rule in rule_strategy(),
    ) {
        let mut reg = build(&board);
        let n = reg.len();
        let mut rng = SmallRng::seed_from_u64(seed);
        let total_before: u64 = reg.iter().map(|(_, t)| u64::from(t.troops)).sum();

        for (a, d) in picks {
            let before = reg.snapshot();
            match resolve_attack(&mut reg, a % n + 1, d % n + 1, &mut rng, rule) {
                Ok(out) => {
                    prop_assert_eq!(out.attacker_troops, reg.get(out.attacker).unwrap().troops);
                    prop_assert_eq!(out.defender_troops, reg.get(out.defender).unwrap().troops);
                }
                Err(_) => {
                    prop_assert_eq!(reg.snapshot(), before);
                }
            }
            prop_assert_eq!(reg.len(), n);
            prop_assert!(reg.is_populated());
        }

        // Troops are only ever lost or moved, never created.
        let total_after: u64 = reg.iter().map(|(_, t)| u64::from(t.troops)).sum();
        prop_assert!(total_after <= total_before);
    }

    #[test]
    fn identical_inputs_give_identical_outcomes(
        board in board_strategy(),
        a in 0usize..8,
        d in 0usize..8,
        attack in 1u8..=6,
        defend in 1u8..=6,
        rule in rule_strategy(),
    ) {
        let n = board.len();
        let (a, d) = (a % n + 1, d % n + 1);
        let mut first = build(&board);
        let mut second = build(&board);
        let rolls = Rolls::new(attack, defend);
        prop_assert_eq!(
            resolve_with_rolls(&mut first, a, d, rolls, rule),
            resolve_with_rolls(&mut second, a, d, rolls, rule)
        );
        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn winner_follows_strict_comparison(attack in 1u8..=6, defend in 1u8..=6) {
        let mut reg = build(&[(0, 5), (1, 3)]);
        let rolls = Rolls::new(attack, defend);
        let out = resolve_with_rolls(&mut reg, 1, 2, rolls, AttackRule::Attrition).unwrap();
        let expected = if attack > defend { Winner::Attacker } else { Winner::Defender };
        prop_assert_eq!(out.winner, expected);
        match expected {
            Winner::Attacker => {
                prop_assert_eq!((out.attacker_troops, out.defender_troops), (5, 2));
            }
            Winner::Defender => {
                prop_assert_eq!((out.attacker_troops, out.defender_troops), (4, 3));
            }
        }
    }

    #[test]
    fn self_attack_always_fails(troops in 0i64..1000, index in 1usize..=2) {
        let mut reg = build(&[(0, troops), (1, troops)]);
        let mut rng = SmallRng::seed_from_u64(0);
        prop_assert_eq!(
            resolve_attack(&mut reg, index, index, &mut rng, AttackRule::Attrition),
            Err(AttackError::SelfAttack(index))
        );
    }

    #[test]
    fn same_faction_always_fails(faction in 0usize..3, t1 in 0i64..100, t2 in 0i64..100) {
        let mut reg = build(&[(faction, t1), (faction, t2)]);
        let err = resolve_with_rolls(&mut reg, 1, 2, Rolls::new(6, 1), AttackRule::Attrition)
            .unwrap_err();
        prop_assert!(matches!(err, AttackError::Alliance(_)));
    }

    #[test]
    fn weak_attacker_always_fails(troops in 0i64..2, defender in 0i64..100) {
        let mut reg = build(&[(0, troops), (1, defender)]);
        let err = resolve_with_rolls(&mut reg, 1, 2, Rolls::new(6, 1), AttackRule::Attrition)
            .unwrap_err();
        prop_assert_eq!(err, AttackError::InsufficientTroops(troops as u32));
    }

    #[test]
    fn missions_match_a_direct_count(
        board in board_strategy(),
        target in 0usize..3,
        k in 0usize..9,
    ) {
        let reg = build(&board);
        let faction = Faction::parse(FACTIONS[target], LabelPolicy::Reject).unwrap();
        let count = board.iter().filter(|(f, _)| *f == target).count();

        let destroy = Mission::DestroyFaction { target: faction.clone() };
        prop_assert_eq!(check_victory(&reg, &destroy), count == 0);
        let conquer = Mission::ConquerCount { threshold: k, faction };
        prop_assert_eq!(check_victory(&reg, &conquer), count >= k);
    }
}
