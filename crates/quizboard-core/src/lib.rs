pub mod card;
pub mod config;
pub mod document;
pub mod history;
pub mod intent;
pub mod ranking;
pub mod replay;
pub mod resolver;
pub mod round;
pub mod snapshot;
pub mod team;

pub use card::{Card, CardKind, CardPreset};
pub use config::{DefenseStacking, EngineConfig, OvertakeBlocking};
pub use history::RoundLog;
pub use ranking::{ScoreField, Standings, TeamStanding};
pub use replay::{replay, standings};
pub use round::Round;
pub use team::{TeamId, TeamState};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::card::Card;
    use crate::round::{Round, RoundId};
    use crate::team::{TeamId, TeamState};

    /// Build a round from literal winners and cards.
    pub fn make_round(id: RoundId, points: i32, winners: &[TeamId], cards: Vec<Card>) -> Round {
        Round::new(id, points, winners.to_vec(), cards)
    }

    /// Roster with ids `1..=n` whose base and total equal `scores[i]`.
    pub fn teams_with_totals(scores: &[i32]) -> Vec<TeamState> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let mut team = TeamState::new(i as TeamId + 1);
                team.credit(score);
                team
            })
            .collect()
    }

    /// Totals in roster order.
    pub fn totals(teams: &[TeamState]) -> Vec<i32> {
        teams.iter().map(|t| t.total_score).collect()
    }

    /// Look up a team by id, panicking if it is missing.
    pub fn team(teams: &[TeamState], id: TeamId) -> &TeamState {
        teams
            .iter()
            .find(|t| t.id == id)
            .unwrap_or_else(|| panic!("team {id} not on roster"))
    }
}
