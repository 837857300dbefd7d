//! Interactive console shell.
//!
//! Drives a `Session` from line-oriented input: reads the territory count,
//! registers every territory (re-prompting a slot on invalid fields), then
//! loops over the main menu until the player exits, the mission is met, or
//! input ends. Generic over reader and writer so it runs against in-memory
//! buffers as well as stdin/stdout.

pub mod input;
pub mod render;

pub use input::{parse_index, parse_int, parse_menu_choice, LineReader, MenuChoice};
pub use render::{describe_outcome, write_map};

use std::io::{self, BufRead, Write};

use crate::config::GameConfig;
use crate::session::{Conclusion, Session, SessionState};

/// How the shell finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellExit {
    /// The player chose to exit from the menu.
    Exited,
    /// The mission was satisfied, at the start of play or by an attack.
    MissionComplete,
    /// The territory count was missing or not positive.
    InvalidSetup,
    /// Input ended before every territory was registered.
    SetupAborted,
    /// Input ended at the main menu.
    InputClosed,
}

impl ShellExit {
    /// Process exit code for this outcome.
    pub fn code(self) -> u8 {
        match self {
            ShellExit::Exited | ShellExit::MissionComplete | ShellExit::InputClosed => 0,
            ShellExit::InvalidSetup | ShellExit::SetupAborted => 1,
        }
    }
}

/// Writes `text` without a newline and flushes so the prompt is visible.
fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

/// Runs one full game.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: GameConfig,
) -> io::Result<ShellExit> {
    let mut lines = LineReader::new(input);

    prompt(out, "Number of territories: ")?;
    let count = lines.next_line()?.as_deref().and_then(parse_int);
    let mut session = match count.map(|n| Session::new(n, config)) {
        Some(Ok(session)) => session,
        Some(Err(e)) => {
            writeln!(out, "Invalid number ({}). Exiting.", e)?;
            return Ok(ShellExit::InvalidSetup);
        }
        None => {
            writeln!(out, "Invalid number. Exiting.")?;
            return Ok(ShellExit::InvalidSetup);
        }
    };

    if !register_all(&mut lines, out, &mut session)? {
        writeln!(out, "Input ended before setup finished.")?;
        return Ok(ShellExit::SetupAborted);
    }
    write_map(out, session.registry())?;

    match session.begin() {
        Ok(mission) => writeln!(out, "Your mission: {}.", mission)?,
        Err(e) => {
            writeln!(out, "Could not start the game: {}", e)?;
            return Ok(ShellExit::InvalidSetup);
        }
    }

    if finished(out, &session)? {
        return Ok(ShellExit::MissionComplete);
    }
    main_menu(&mut lines, out, &mut session)
}

/// Announces a completed mission. Returns true if the session is won.
fn finished<W: Write>(out: &mut W, session: &Session) -> io::Result<bool> {
    if session.state() != SessionState::Concluded(Conclusion::MissionComplete) {
        return Ok(false);
    }
    if let Some(mission) = session.mission() {
        writeln!(out, "Mission complete: {}!", mission)?;
    }
    Ok(true)
}

/// Fills every slot. Returns false if input ends first.
fn register_all<R: BufRead, W: Write>(
    lines: &mut LineReader<R>,
    out: &mut W,
    session: &mut Session,
) -> io::Result<bool> {
    let n = session.registry().len();
    writeln!(out, "Registering {} territories.", n)?;

    let mut index = 1;
    while index <= n {
        writeln!(out, "Territory {}", index)?;

        prompt(out, "  Name: ")?;
        let Some(name) = lines.next_line()? else {
            return Ok(false);
        };
        prompt(out, "  Faction: ")?;
        let Some(faction) = lines.next_line()? else {
            return Ok(false);
        };
        prompt(out, "  Troops: ")?;
        let Some(troops) = lines.next_line()? else {
            return Ok(false);
        };

        let Some(troops) = parse_int(&troops) else {
            writeln!(out, "Error: troop count must be an integer >= 0. Try again.")?;
            continue;
        };
        match session.register(index, &name, &faction, troops) {
            Ok(_) => {
                writeln!(out)?;
                index += 1;
            }
            Err(e) => writeln!(out, "Error: {}. Try again.", e)?,
        }
    }
    Ok(true)
}

fn main_menu<R: BufRead, W: Write>(
    lines: &mut LineReader<R>,
    out: &mut W,
    session: &mut Session,
) -> io::Result<ShellExit> {
    loop {
        writeln!(out, "Actions:")?;
        writeln!(out, "  1) Show territories")?;
        writeln!(out, "  2) Attack")?;
        writeln!(out, "  3) Exit")?;
        prompt(out, "Choice: ")?;

        let Some(line) = lines.next_line()? else {
            return Ok(ShellExit::InputClosed);
        };
        match parse_menu_choice(&line) {
            Some(MenuChoice::Show) => write_map(out, session.registry())?,
            Some(MenuChoice::Attack) => {
                write_map(out, session.registry())?;
                if !attack_turn(lines, out, session)? {
                    return Ok(ShellExit::InputClosed);
                }
                if finished(out, session)? {
                    return Ok(ShellExit::MissionComplete);
                }
            }
            Some(MenuChoice::Exit) => {
                if let Err(e) = session.exit() {
                    tracing::warn!(error = %e, "exit from concluded session");
                }
                writeln!(out, "Exiting.")?;
                return Ok(ShellExit::Exited);
            }
            None => writeln!(out, "Invalid option. Try again.")?,
        }
    }
}

/// Prompts for two territories and attacks. Returns false if input ends.
fn attack_turn<R: BufRead, W: Write>(
    lines: &mut LineReader<R>,
    out: &mut W,
    session: &mut Session,
) -> io::Result<bool> {
    prompt(out, "Attacking territory ID: ")?;
    let Some(attacker) = lines.next_line()? else {
        return Ok(false);
    };
    prompt(out, "Defending territory ID: ")?;
    let Some(defender) = lines.next_line()? else {
        return Ok(false);
    };

    let (Some(attacker), Some(defender)) = (parse_index(&attacker), parse_index(&defender)) else {
        writeln!(out, "Invalid input.")?;
        return Ok(true);
    };
    let len = session.registry().len();
    if !(1..=len).contains(&attacker) || !(1..=len).contains(&defender) {
        writeln!(out, "Invalid IDs. Use values between 1 and {}.", len)?;
        return Ok(true);
    }

    match session.attack(attacker, defender) {
        Ok(outcome) => {
            writeln!(out, "{}", describe_outcome(&outcome, session.registry()))?;
            write_map(out, session.registry())?;
        }
        Err(e) => writeln!(out, "Error: {}.", e)?,
    }
    Ok(true)
}
