//! Per-team card selections for the round being entered.
//!
//! Every edit produces a new value; nothing is mutated in place, so a draft
//! can be reused as the template for the next round without aliasing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardKind, CardPreset};
use crate::round::{Round, RoundId};
use crate::team::TeamId;

/// The card one team intends to play this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIntent {
    pub team_id: TeamId,
    pub preset: CardPreset,
    /// Attack target. Kept when the preset changes.
    pub target_id: TeamId,
    /// Number of charges when the preset is defense.
    pub defense_quantity: u32,
}

impl CardIntent {
    /// No card; team 1 aims at team 2, everyone else at team 1.
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            preset: CardPreset::None,
            target_id: if team_id == 1 { 2 } else { 1 },
            defense_quantity: 1,
        }
    }

    pub fn with_preset(self, preset: CardPreset) -> Self {
        Self {
            preset,
            defense_quantity: 1,
            ..self
        }
    }

    pub fn with_target(self, target_id: TeamId) -> Self {
        Self { target_id, ..self }
    }

    pub fn with_defense_quantity(self, quantity: u32) -> Self {
        Self {
            defense_quantity: quantity.max(1),
            ..self
        }
    }

    /// The card to record, or `None` when no item is selected.
    pub fn to_card(&self) -> Option<Card> {
        let kind = self.preset.kind();
        let value = match kind {
            CardKind::None => return None,
            CardKind::Defense => i32::try_from(self.defense_quantity).unwrap_or(i32::MAX),
            _ => self.preset.value(),
        };
        Some(Card {
            team_id: self.team_id,
            kind,
            value,
            target_id: (kind == CardKind::Attack).then_some(self.target_id),
        })
    }
}

/// Input for the next round: points, correct teams, and one intent per team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDraft {
    pub points: i32,
    pub winners: BTreeSet<TeamId>,
    pub intents: Vec<CardIntent>,
}

impl RoundDraft {
    pub fn new(roster_size: u32) -> Self {
        Self {
            points: 1,
            winners: BTreeSet::new(),
            intents: (1..=roster_size).map(CardIntent::new).collect(),
        }
    }

    pub fn with_points(self, points: i32) -> Self {
        Self { points, ..self }
    }

    /// Add `team` to the winners, or remove it if already there.
    pub fn toggle_winner(mut self, team: TeamId) -> Self {
        if !self.winners.remove(&team) {
            self.winners.insert(team);
        }
        self
    }

    /// Replace one team's intent with `edit(intent)`. Unknown teams are ignored.
    pub fn with_intent(mut self, team: TeamId, edit: impl FnOnce(CardIntent) -> CardIntent) -> Self {
        if let Some(slot) = self.intents.iter_mut().find(|i| i.team_id == team) {
            *slot = edit(*slot);
        }
        self
    }

    pub fn intent(&self, team: TeamId) -> Option<&CardIntent> {
        self.intents.iter().find(|i| i.team_id == team)
    }

    /// Freeze the draft into a round, leaving out teams with no card.
    pub fn build(&self, id: RoundId) -> Round {
        Round::new(
            id,
            self.points,
            self.winners.iter().copied().collect(),
            self.intents.iter().filter_map(CardIntent::to_card).collect(),
        )
    }

    /// Template for the following round: no winners, no cards, same points and targets.
    pub fn cleared(&self) -> Self {
        Self {
            points: self.points,
            winners: BTreeSet::new(),
            intents: self
                .intents
                .iter()
                .map(|i| i.with_preset(CardPreset::None))
                .collect(),
        }
    }
}
