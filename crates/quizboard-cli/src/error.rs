use std::path::PathBuf;

use quizboard_core::config::ConfigError;
use quizboard_core::document::DocumentError;
use quizboard_core::history::DuplicateRound;
use quizboard_core::round::RoundId;
use quizboard_core::snapshot::SnapshotError;

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Document(DocumentError),
    Snapshot(SnapshotError),
    InvalidCard(String),
    InvalidRound(String),
    UnknownRound(RoundId),
    Output(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(m) => write!(f, "config: {m}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Document(e) => write!(f, "game document: {e}"),
            Self::Snapshot(e) => write!(f, "snapshot: {e}"),
            Self::InvalidCard(m) | Self::InvalidRound(m) | Self::Output(m) => write!(f, "{m}"),
            Self::UnknownRound(id) => write!(f, "no round with id {id}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Document(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<DuplicateRound> for CliError {
    fn from(e: DuplicateRound) -> Self {
        Self::InvalidRound(e.to_string())
    }
}
