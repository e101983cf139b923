use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::team::TeamId;

/// Effect category of an item card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// No item used. Never stored in a round.
    #[default]
    None,
    /// Steal `value` points from the target team.
    Attack,
    /// Gain `value` bonus points.
    Plus,
    /// Jump past the team `value - 1` positions above.
    Overtake,
    /// Hold `value` shield charges for this round.
    Defense,
    /// A `cardType` this engine does not know. Skipped during resolution.
    #[serde(other)]
    Unknown,
}

/// One item-effect declaration attached to a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unreadable ids decode as [`UNKNOWN_TEAM`].
    #[serde(default, deserialize_with = "deserialize_team")]
    pub team_id: TeamId,
    #[serde(rename = "cardType", default)]
    pub kind: CardKind,
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: i32,
    /// Only read for attacks.
    #[serde(
        default,
        deserialize_with = "deserialize_target",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_id: Option<TeamId>,
}

impl Card {
    pub fn attack(team_id: TeamId, value: i32, target_id: TeamId) -> Self {
        Self {
            team_id,
            kind: CardKind::Attack,
            value,
            target_id: Some(target_id),
        }
    }

    pub fn plus(team_id: TeamId, value: i32) -> Self {
        Self {
            team_id,
            kind: CardKind::Plus,
            value,
            target_id: None,
        }
    }

    pub fn overtake(team_id: TeamId, steps: i32) -> Self {
        Self {
            team_id,
            kind: CardKind::Overtake,
            value: steps,
            target_id: None,
        }
    }

    pub fn defense(team_id: TeamId, charges: i32) -> Self {
        Self {
            team_id,
            kind: CardKind::Defense,
            value: charges,
            target_id: None,
        }
    }
}

/// Team id given to cards whose `teamId` cannot be read. Rosters start at 1.
pub const UNKNOWN_TEAM: TeamId = 0;

/// A stored number: JSON integer, numeric string, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    pub(crate) fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }

    pub(crate) fn to_team(&self) -> Option<TeamId> {
        self.to_i64().and_then(|n| TeamId::try_from(n).ok())
    }
}

fn deserialize_team<'de, D>(deserializer: D) -> Result<TeamId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.to_team()).unwrap_or(UNKNOWN_TEAM))
}

/// Unreadable values become 0 and the card is skipped as non-positive.
fn deserialize_value<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|r| r.to_i64())
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0))
}

/// Stored documents carry `targetId` as a string; accept either form.
fn deserialize_target<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.to_team()))
}

/// The closed catalog of selectable item cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPreset {
    #[default]
    None,
    #[serde(rename = "attack_1")]
    Attack1,
    #[serde(rename = "attack_2")]
    Attack2,
    #[serde(rename = "attack_3")]
    Attack3,
    #[serde(rename = "plus_1")]
    Plus1,
    #[serde(rename = "plus_2")]
    Plus2,
    #[serde(rename = "plus_3")]
    Plus3,
    #[serde(rename = "overtake_2")]
    Overtake2,
    #[serde(rename = "overtake_3")]
    Overtake3,
    Defense,
}

impl CardPreset {
    pub const ALL: [CardPreset; 10] = [
        CardPreset::None,
        CardPreset::Attack1,
        CardPreset::Attack2,
        CardPreset::Attack3,
        CardPreset::Plus1,
        CardPreset::Plus2,
        CardPreset::Plus3,
        CardPreset::Overtake2,
        CardPreset::Overtake3,
        CardPreset::Defense,
    ];

    pub fn kind(self) -> CardKind {
        match self {
            Self::None => CardKind::None,
            Self::Attack1 | Self::Attack2 | Self::Attack3 => CardKind::Attack,
            Self::Plus1 | Self::Plus2 | Self::Plus3 => CardKind::Plus,
            Self::Overtake2 | Self::Overtake3 => CardKind::Overtake,
            Self::Defense => CardKind::Defense,
        }
    }

    /// Default value carried by the preset. Defense quantity is editable.
    pub fn value(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Attack1 | Self::Plus1 | Self::Defense => 1,
            Self::Attack2 | Self::Plus2 | Self::Overtake2 => 2,
            Self::Attack3 | Self::Plus3 | Self::Overtake3 => 3,
        }
    }

    /// Stable key used in stored intents and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Attack1 => "attack_1",
            Self::Attack2 => "attack_2",
            Self::Attack3 => "attack_3",
            Self::Plus1 => "plus_1",
            Self::Plus2 => "plus_2",
            Self::Plus3 => "plus_3",
            Self::Overtake2 => "overtake_2",
            Self::Overtake3 => "overtake_3",
            Self::Defense => "defense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No item",
            Self::Attack1 => "Attack (1 pt)",
            Self::Attack2 => "Attack (2 pts)",
            Self::Attack3 => "Attack (3 pts)",
            Self::Plus1 => "Bonus (1 pt)",
            Self::Plus2 => "Bonus (2 pts)",
            Self::Plus3 => "Bonus (3 pts)",
            Self::Overtake2 => "Overtake 2nd above",
            Self::Overtake3 => "Overtake 3rd above",
            Self::Defense => "Defense",
        }
    }

    /// Resolve a stored card back to the preset it was picked from.
    ///
    /// Defense matches on kind alone since its quantity is free-form.
    pub fn matching(kind: CardKind, value: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.kind() == kind && (kind == CardKind::Defense || p.value() == value))
    }
}

impl fmt::Display for CardPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown preset key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown card preset: {}", self.0)
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for CardPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
