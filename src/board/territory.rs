//! Territory records and their bounded text labels.
//!
//! Names and faction labels are validated value types with a fixed maximum
//! length in characters. What happens to over-long input is controlled by
//! a `LabelPolicy`, so registration behaves the same way on every run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a territory name, in characters.
pub const MAX_NAME_LEN: usize = 29;

/// Maximum length of a faction label, in characters.
pub const MAX_FACTION_LEN: usize = 9;

/// How over-long labels are handled during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Keep the first `MAX` characters and drop the rest.
    #[default]
    Truncate,
    /// Refuse the value with `FieldIssue::TooLong`.
    Reject,
}

impl LabelPolicy {
    /// Parses a policy from its lowercase name.
    pub fn from_name(s: &str) -> Option<LabelPolicy> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Some(LabelPolicy::Truncate),
            "reject" => Some(LabelPolicy::Reject),
            _ => None,
        }
    }
}

/// A territory field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Faction,
    Troops,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Name => "name",
            Field::Faction => "faction",
            Field::Troops => "troop count",
        };
        f.write_str(s)
    }
}

/// Why a field value was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldIssue {
    #[error("must not be empty")]
    Empty,

    #[error("must be at most {max} characters (got {len})")]
    TooLong { max: usize, len: usize },

    #[error("contains a control character")]
    ControlChar,

    #[error("must be a non-negative integer (got {0})")]
    Negative(i64),

    #[error("is too large (got {0})")]
    TooLarge(i64),
}

/// A non-empty text label of at most `MAX` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label<const MAX: usize>(String);

/// The display name of a territory.
pub type TerritoryName = Label<MAX_NAME_LEN>;

/// The label of the side controlling a territory.
pub type Faction = Label<MAX_FACTION_LEN>;

impl<const MAX: usize> Label<MAX> {
    /// Validates `raw` as a label.
    ///
    /// Surrounding whitespace is trimmed first. Over-long input is either
    /// cut to `MAX` characters or refused, depending on `policy`.
    pub fn parse(raw: &str, policy: LabelPolicy) -> Result<Self, FieldIssue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldIssue::Empty);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(FieldIssue::ControlChar);
        }

        let len = trimmed.chars().count();
        if len <= MAX {
            return Ok(Label(trimmed.to_string()));
        }
        match policy {
            LabelPolicy::Reject => Err(FieldIssue::TooLong { max: MAX, len }),
            LabelPolicy::Truncate => {
                let cut: String = trimmed.chars().take(MAX).collect();
                // Truncation can expose trailing whitespace from the middle of the input.
                Ok(Label(cut.trim_end().to_string()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> TryFrom<String> for Label<MAX> {
    type Error = FieldIssue;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Label::parse(&s, LabelPolicy::Reject)
    }
}

impl<const MAX: usize> From<Label<MAX>> for String {
    fn from(label: Label<MAX>) -> String {
        label.0
    }
}

impl<const MAX: usize> fmt::Display for Label<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward to str so width and alignment flags apply.
        fmt::Display::fmt(&self.0, f)
    }
}

/// Validates a troop count read as a signed integer.
pub fn parse_troops(troops: i64) -> Result<u32, FieldIssue> {
    if troops < 0 {
        return Err(FieldIssue::Negative(troops));
    }
    u32::try_from(troops).map_err(|_| FieldIssue::TooLarge(troops))
}

/// A named unit of the map with a controlling faction and a troop count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    pub name: TerritoryName,
    pub faction: Faction,
    pub troops: u32,
}

impl Territory {
    pub fn new(name: TerritoryName, faction: Faction, troops: u32) -> Self {
        Territory { name, faction, troops }
    }

    /// Returns true if both territories are controlled by the same faction.
    pub fn is_allied_with(&self, other: &Territory) -> bool {
        self.faction == other.faction
    }

    /// Removes one troop, stopping at zero.
    pub fn lose_troop(&mut self) {
        self.troops = self.troops.saturating_sub(1);
    }
}
