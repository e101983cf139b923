use quizboard_core::{TeamId, TeamStanding};

pub use quizboard_core::test_helpers::make_round as round;

/// `(id, total, rank)` triples in display order.
pub fn board(teams: &[TeamStanding]) -> Vec<(TeamId, i32, u32)> {
    teams.iter().map(|t| (t.id, t.total_score, t.rank)).collect()
}
