use std::fmt;

use serde::{Deserialize, Serialize};

use crate::team::DEFAULT_ROSTER_SIZE;

/// Upper bound on the roster size accepted by [`EngineConfig::validate`].
pub const MAX_ROSTER_SIZE: u32 = 1000;

/// How defense cards played in the same round combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseStacking {
    /// Every defense card adds its value to the team's charges.
    #[default]
    Additive,
    /// A team holds one charge this round if it played any defense card.
    Binary,
}

/// Which teams above an overtake caster can block the jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertakeBlocking {
    /// Every team ranked above the caster; the highest-ranked holder spends a charge.
    #[default]
    FirstAbove,
    /// Only the teams the caster would jump past (target position up to the caster).
    WithinWindow,
}

/// Scoring rules for one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of teams on the roster (ids `1..=roster_size`).
    pub roster_size: u32,
    pub defense: DefenseStacking,
    pub overtake_block: OvertakeBlocking,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roster_size: DEFAULT_ROSTER_SIZE,
            defense: DefenseStacking::default(),
            overtake_block: OvertakeBlocking::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRoster,
    RosterTooLarge(u32),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoster => write!(f, "roster_size must be > 0"),
            Self::RosterTooLarge(n) => {
                write!(f, "roster_size {n} exceeds maximum of {MAX_ROSTER_SIZE}")
            },
            Self::Parse(e) => write!(f, "invalid engine config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    /// Config for a roster of `roster_size` teams with canonical rules.
    pub fn with_roster(roster_size: u32) -> Self {
        Self {
            roster_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_size == 0 {
            return Err(ConfigError::EmptyRoster);
        }
        if self.roster_size > MAX_ROSTER_SIZE {
            return Err(ConfigError::RosterTooLarge(self.roster_size));
        }
        Ok(())
    }

    /// Parse and validate a TOML engine table.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
