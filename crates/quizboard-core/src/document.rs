use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::RoundLog;
use crate::round::Round;

/// Id of the single game document a competition is stored under.
pub const DOCUMENT_ID: &str = "current_game";

#[derive(Debug)]
pub enum DocumentError {
    /// The document is not a JSON object.
    NotAnObject,
    /// `rounds` exists but is not an ordered list; there is no sane order to replay.
    RoundsNotAList,
    /// A round inside the list does not have the expected shape.
    MalformedRound(String),
    Json(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "game document must be a JSON object"),
            Self::RoundsNotAList => write!(f, "game document `rounds` must be a list"),
            Self::MalformedRound(e) => write!(f, "malformed round: {e}"),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Stored form of a competition: the round log plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub id: String,
    pub rounds: Vec<Round>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for GameDocument {
    fn default() -> Self {
        Self {
            id: DOCUMENT_ID.to_string(),
            rounds: Vec::new(),
            updated_at: None,
        }
    }
}

impl GameDocument {
    /// Snapshot a round log, stamped with the current time.
    pub fn from_log(log: &RoundLog) -> Self {
        Self {
            id: DOCUMENT_ID.to_string(),
            rounds: log.rounds().to_vec(),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn into_log(self) -> RoundLog {
        RoundLog::from_rounds(self.rounds)
    }

    /// Parse a stored document.
    ///
    /// A missing or `null` `rounds` is an empty game. Anything else that is not
    /// a list fails fast.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let mut value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| DocumentError::Json(e.to_string()))?;
        let object = value.as_object_mut().ok_or(DocumentError::NotAnObject)?;

        let rounds = match object.remove("rounds") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(list @ serde_json::Value::Array(_)) => serde_json::from_value::<Vec<Round>>(list)
                .map_err(|e| DocumentError::MalformedRound(e.to_string()))?,
            Some(_) => return Err(DocumentError::RoundsNotAList),
        };

        let id = object
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or(DOCUMENT_ID)
            .to_string();
        let updated_at = object
            .get("updatedAt")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc));

        Ok(Self {
            id,
            rounds,
            updated_at,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Json(e.to_string()))
    }
}
