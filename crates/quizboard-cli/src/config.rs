use std::path::{Path, PathBuf};

use serde::Deserialize;

use quizboard_core::config::EngineConfig;

use crate::error::CliError;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "quizboard.toml";

/// Top-level CLI configuration, loaded from `quizboard.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Game document holding the round log.
    pub log_path: PathBuf,
    pub engine: EngineConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("quizboard.json"),
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from `explicit`, else `QUIZBOARD_CONFIG`, else `quizboard.toml` if it
    /// exists, then apply environment overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let env_path = std::env::var("QUIZBOARD_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let required = explicit.is_some() || env_path.is_some();
        let path = explicit
            .map(Path::to_path_buf)
            .or(env_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)
                    .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
                tracing::info!(path = %path.display(), "Loaded configuration");
                config
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::info!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                Self::default()
            },
            Err(source) => return Err(CliError::Io { path, source }),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `QUIZBOARD_ROSTER_SIZE` and `QUIZBOARD_LOG` from `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), CliError> {
        if let Some(size) = lookup("QUIZBOARD_ROSTER_SIZE")
            && !size.is_empty()
        {
            self.engine.roster_size = size.trim().parse().map_err(|_| {
                CliError::Config(format!("QUIZBOARD_ROSTER_SIZE is not a number: {size}"))
            })?;
        }
        if let Some(path) = lookup("QUIZBOARD_LOG")
            && !path.is_empty()
        {
            self.log_path = PathBuf::from(path);
        }
        Ok(())
    }
}
