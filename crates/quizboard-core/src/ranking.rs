use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::team::{TeamId, TeamState};

/// Which score a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    /// Score after item effects.
    #[default]
    Total,
    /// Correct-answer points only.
    Base,
}

impl ScoreField {
    pub fn of(self, team: &TeamState) -> i32 {
        match self {
            Self::Total => team.total_score,
            Self::Base => team.base_score,
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total => f.write_str("total"),
            Self::Base => f.write_str("base"),
        }
    }
}

impl FromStr for ScoreField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "base" => Ok(Self::Base),
            other => Err(format!("unknown score field: {other} (expected total or base)")),
        }
    }
}

/// Final, ranked record of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub id: TeamId,
    pub base_score: i32,
    pub total_score: i32,
    pub item_diff: i32,
    pub rank: u32,
}

/// A ranked leaderboard, ordered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub field: ScoreField,
    pub teams: Vec<TeamStanding>,
}

impl Standings {
    pub fn from_teams(teams: &[TeamState], field: ScoreField) -> Self {
        Self {
            field,
            teams: assign_ranks(teams, field),
        }
    }

    pub fn get(&self, id: TeamId) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Teams ranked `n` or better (podium view). Ties can make this longer than `n`.
    pub fn top(&self, n: u32) -> impl Iterator<Item = &TeamStanding> + '_ {
        self.teams.iter().take_while(move |t| t.rank <= n)
    }

    /// Score of a standing under this leaderboard's field.
    pub fn score_of(&self, team: &TeamStanding) -> i32 {
        match self.field {
            ScoreField::Total => team.total_score,
            ScoreField::Base => team.base_score,
        }
    }
}

/// Indices into `teams`, highest `field` first, ties by ascending id.
pub(crate) fn sorted_indices(teams: &[TeamState], field: ScoreField) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| {
        field
            .of(&teams[b])
            .cmp(&field.of(&teams[a]))
            .then(teams[a].id.cmp(&teams[b].id))
    });
    order
}

/// Sort by `field` and assign competition ranks (1, 2, 2, 4).
pub fn assign_ranks(teams: &[TeamState], field: ScoreField) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = Vec::with_capacity(teams.len());
    let mut previous: Option<(i32, u32)> = None;

    for (position, index) in sorted_indices(teams, field).into_iter().enumerate() {
        let team = &teams[index];
        let score = field.of(team);
        let rank = match previous {
            Some((prev_score, prev_rank)) if prev_score == score => prev_rank,
            _ => position as u32 + 1,
        };
        previous = Some((score, rank));
        standings.push(TeamStanding {
            id: team.id,
            base_score: team.base_score,
            total_score: team.total_score,
            item_diff: team.item_diff,
            rank,
        });
    }
    standings
}
