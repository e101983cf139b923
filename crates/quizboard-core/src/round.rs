use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::card::{Card, CardKind, RawNumber};
use crate::team::TeamId;

/// Identifier of a recorded round. Used for deletion, not for ordering.
pub type RoundId = u64;

/// One scoring event: the teams that answered correctly plus the item cards played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// Base value of a correct answer this round.
    pub points: i32,
    #[serde(default, deserialize_with = "deserialize_winners")]
    pub winners: Vec<TeamId>,
    #[serde(default, deserialize_with = "deserialize_cards")]
    pub cards: Vec<Card>,
}

/// Unreadable winner ids are dropped; they could never match a team.
fn deserialize_winners<'de, D>(deserializer: D) -> Result<Vec<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawNumber>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(RawNumber::to_team)
        .collect())
}

/// Entries that are not card objects are dropped so the rest of the round survives.
fn deserialize_cards<'de, D>(deserializer: D) -> Result<Vec<Card>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Card(Card),
        Other(IgnoredAny),
    }

    let raw = Option::<Vec<Entry>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match entry {
            Entry::Card(card) => Some(card),
            Entry::Other(_) => {
                tracing::warn!("Dropping card entry that is not an object");
                None
            },
        })
        .collect())
}

impl Round {
    /// Build a round, dropping every "no item" card.
    pub fn new(id: RoundId, points: i32, winners: Vec<TeamId>, cards: Vec<Card>) -> Self {
        let cards = cards
            .into_iter()
            .filter(|c| c.kind != CardKind::None)
            .collect();
        Self {
            id,
            points,
            winners,
            cards,
        }
    }

    pub fn is_winner(&self, team: TeamId) -> bool {
        self.winners.contains(&team)
    }

    /// Cards of one kind, in declaration order.
    pub fn cards_of(&self, kind: CardKind) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.kind == kind)
    }
}
