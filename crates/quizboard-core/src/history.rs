use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::intent::RoundDraft;
use crate::ranking::{ScoreField, Standings};
use crate::replay::replay;
use crate::round::{Round, RoundId};
use crate::team::TeamState;

/// Returned when appending a round whose id is already recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRound(pub RoundId);

impl fmt::Display for DuplicateRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {} is already recorded", self.0)
    }
}

impl std::error::Error for DuplicateRound {}

/// Append-ordered history of every recorded round.
///
/// Standings are always recomputed from the whole log; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundLog {
    rounds: Vec<Round>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// One past the largest id recorded so far, saturating at `u64::MAX`.
    pub fn next_id(&self) -> RoundId {
        self.rounds
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    pub fn contains(&self, id: RoundId) -> bool {
        self.rounds.iter().any(|r| r.id == id)
    }

    pub fn push(&mut self, round: Round) -> Result<(), DuplicateRound> {
        if self.contains(round.id) {
            return Err(DuplicateRound(round.id));
        }
        tracing::info!(
            round_id = round.id,
            points = round.points,
            winners = round.winners.len(),
            cards = round.cards.len(),
            "Round recorded"
        );
        self.rounds.push(round);
        Ok(())
    }

    /// Record the draft as a new round and return its id.
    ///
    /// Fails only once the id space is exhausted.
    pub fn push_draft(&mut self, draft: &RoundDraft) -> Result<RoundId, DuplicateRound> {
        let id = self.next_id();
        self.push(draft.build(id))?;
        Ok(id)
    }

    pub fn remove(&mut self, id: RoundId) -> Option<Round> {
        let index = self.rounds.iter().position(|r| r.id == id)?;
        tracing::info!(round_id = id, "Round removed");
        Some(self.rounds.remove(index))
    }

    /// Drop every round.
    pub fn reset(&mut self) {
        tracing::info!(rounds = self.rounds.len(), "Round log reset");
        self.rounds.clear();
    }

    pub fn replay(&self, config: &EngineConfig) -> Vec<TeamState> {
        replay(&self.rounds, config)
    }

    pub fn standings(&self, config: &EngineConfig, field: ScoreField) -> Standings {
        Standings::from_teams(&self.replay(config), field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardPreset};
    use crate::test_helpers::{make_round, totals};

    #[test]
    fn next_id_follows_largest_recorded() {
        let mut log = RoundLog::new();
        assert_eq!(log.next_id(), 1);
        log.push(make_round(7, 1, &[], vec![])).unwrap();
        log.push(make_round(3, 1, &[], vec![])).unwrap();
        assert_eq!(log.next_id(), 8);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut log = RoundLog::new();
        log.push(make_round(1, 1, &[1], vec![])).unwrap();
        assert_eq!(
            log.push(make_round(1, 5, &[2], vec![])),
            Err(DuplicateRound(1))
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn push_draft_records_in_order() {
        let mut log = RoundLog::new();
        let draft = RoundDraft::new(3).with_points(2).toggle_winner(1);
        let first = log.push_draft(&draft).unwrap();
        let second = log
            .push_draft(
                &draft
                    .cleared()
                    .toggle_winner(2)
                    .with_intent(2, |i| i.with_preset(CardPreset::Attack1).with_target(1)),
            )
            .unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(log.rounds()[1].cards, vec![Card::attack(2, 1, 1)]);
        assert_eq!(totals(&log.replay(&EngineConfig::with_roster(3))), vec![1, 3, 0]);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let mut log = RoundLog::from_rounds(vec![make_round(u64::MAX, 1, &[1], vec![])]);
        assert_eq!(log.next_id(), u64::MAX);
        assert_eq!(
            log.push_draft(&RoundDraft::new(2)),
            Err(DuplicateRound(u64::MAX))
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn removing_a_round_rewrites_history() {
        let mut log = RoundLog::from_rounds(vec![
            make_round(1, 2, &[1], vec![]),
            make_round(2, 1, &[2], vec![Card::attack(2, 2, 1)]),
        ]);
        let config = EngineConfig::with_roster(2);
        assert_eq!(totals(&log.replay(&config)), vec![0, 3]);

        assert!(log.remove(1).is_some());
        assert_eq!(totals(&log.replay(&config)), vec![0, 1]);
        assert!(log.remove(1).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut log = RoundLog::from_rounds(vec![make_round(1, 2, &[1], vec![])]);
        log.reset();
        assert!(log.is_empty());
        let board = log.standings(&EngineConfig::with_roster(3), ScoreField::Total);
        assert!(board.teams.iter().all(|t| t.rank == 1));
    }
}
