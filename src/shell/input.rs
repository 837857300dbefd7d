//! Console input parsing.
//!
//! Turns raw lines typed by the player into menu choices, territory
//! indices, and counts. Anything malformed parses to `None`; the shell
//! decides whether to re-prompt.

use std::io::{self, BufRead};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    /// Print the territory table.
    Show,
    /// Select two territories and attack.
    Attack,
    /// Leave the game.
    Exit,
}

/// Parses a menu selection: `1`, `2`, or `3`.
pub fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Show),
        "2" => Some(MenuChoice::Attack),
        "3" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Parses a signed integer such as a territory count or troop count.
pub fn parse_int(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

/// Parses a 1-based territory index. Range checks are left to the registry.
pub fn parse_index(line: &str) -> Option<usize> {
    line.trim().parse().ok()
}

/// Reads input one line at a time, tracking end of input.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader {
            inner,
            buf: String::new(),
        }
    }

    /// Returns the next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
