//! Reading and writing the game document on disk.

use std::path::{Path, PathBuf};

use quizboard_core::RoundLog;
use quizboard_core::document::GameDocument;

use crate::error::CliError;

/// Load the round log at `path`. A missing file is an empty competition.
pub fn load_log(path: &Path) -> Result<RoundLog, CliError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let log = GameDocument::from_json(&text)?.into_log();
            tracing::debug!(path = %path.display(), rounds = log.len(), "Loaded game document");
            Ok(log)
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No game document yet, starting empty");
            Ok(RoundLog::new())
        },
        Err(source) => Err(CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write the log next to `path` and rename it into place.
pub fn save_log(path: &Path, log: &RoundLog) -> Result<(), CliError> {
    let text = GameDocument::from_log(log).to_json_pretty()?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, text).map_err(|source| CliError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rounds = log.len(), "Saved game document");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
