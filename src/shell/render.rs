//! Text rendering for the console shell.

use std::io::{self, Write};

use crate::board::{Registry, MAX_FACTION_LEN, MAX_NAME_LEN};
use crate::resolve::{AttackOutcome, Winner};

/// Writes the territory table, one row per slot in index order.
pub fn write_map<W: Write>(out: &mut W, registry: &Registry) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Territories ===")?;
    writeln!(
        out,
        "{:<3} {:<nw$} {:<fw$} {}",
        "ID",
        "NAME",
        "FACTION",
        "TROOPS",
        nw = MAX_NAME_LEN,
        fw = MAX_FACTION_LEN
    )?;
    for (i, slot) in registry.snapshot().iter().enumerate() {
        match slot {
            Some(t) => writeln!(
                out,
                "{:<3} {:<nw$} {:<fw$} {}",
                i + 1,
                t.name,
                t.faction,
                t.troops,
                nw = MAX_NAME_LEN,
                fw = MAX_FACTION_LEN
            )?,
            None => writeln!(
                out,
                "{:<3} {:<nw$} {:<fw$} -",
                i + 1,
                "-",
                "-",
                nw = MAX_NAME_LEN,
                fw = MAX_FACTION_LEN
            )?,
        }
    }
    writeln!(out)
}

/// Describes a resolved attack in two lines: the rolls, then the result.
pub fn describe_outcome(outcome: &AttackOutcome, registry: &Registry) -> String {
    let name = |index: usize| {
        registry
            .get(index)
            .map(|t| t.name.to_string())
            .unwrap_or_else(|_| format!("#{}", index))
    };
    let attacker = name(outcome.attacker);
    let defender = name(outcome.defender);

    let rolls = format!(
        "Rolls: {} (attacker) -> {} | {} (defender) -> {}",
        attacker, outcome.attack_roll, defender, outcome.defend_roll
    );
    let result = match outcome.winner {
        Winner::Attacker if outcome.conquered => {
            let faction = registry
                .get(outcome.defender)
                .map(|t| t.faction.to_string())
                .unwrap_or_default();
            format!(
                "Result: {} won and took {} for {} ({} troops moved in).",
                attacker, defender, faction, outcome.defender_troops
            )
        }
        Winner::Attacker => format!(
            "Result: {} won. {} lost 1 troop (now has {} troops).",
            attacker, defender, outcome.defender_troops
        ),
        Winner::Defender => format!(
            "Result: {} failed and lost 1 troop (now has {} troops).",
            attacker, outcome.attacker_troops
        ),
    };
    format!("{}\n{}", rolls, result)
}
