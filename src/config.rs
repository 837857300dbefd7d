//! Session configuration.
//!
//! A `GameConfig` starts from defaults and can be changed by named options
//! (`set_option`), command-line flags, or a JSON file. Flags are applied in
//! order, so a `--config` file can be overridden by flags that follow it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::LabelPolicy;
use crate::resolve::AttackRule;

/// Errors raised while building a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable rules and setup for one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// What an attacker win does to the defender.
    pub rule: AttackRule,
    /// How over-long names and faction labels are handled.
    pub labels: LabelPolicy,
}

impl GameConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Sets one option by name. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name.to_ascii_lowercase().as_str() {
            "seed" => self.seed = value.trim().parse().map_err(|_| invalid())?,
            "rule" => self.rule = AttackRule::from_name(value.trim()).ok_or_else(invalid)?,
            "labels" => self.labels = LabelPolicy::from_name(value.trim()).ok_or_else(invalid)?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Builds a configuration from command-line arguments (program name excluded).
    ///
    /// Accepts `--seed N`, `--rule attrition|conquest`,
    /// `--labels truncate|reject`, and `--config FILE`.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = GameConfig::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            if !matches!(flag.as_str(), "--seed" | "--rule" | "--labels" | "--config") {
                return Err(ConfigError::UnknownArgument(flag));
            }
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;

            if flag == "--config" {
                config = GameConfig::load(&value)?;
            } else {
                config.set_option(flag.trim_start_matches("--"), &value)?;
            }
        }
        Ok(config)
    }
}
