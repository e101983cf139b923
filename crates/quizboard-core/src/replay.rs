use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::ranking::{ScoreField, Standings};
use crate::resolver::{RoundEvent, resolve_round};
use crate::round::{Round, RoundId};
use crate::team::TeamState;

/// Events produced by one round during a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round_id: RoundId,
    pub events: Vec<RoundEvent>,
}

/// Recompute every team's scores from the full round history.
///
/// Rounds must be in creation order. The result depends only on the inputs;
/// there is no incremental path.
pub fn replay(rounds: &[Round], config: &EngineConfig) -> Vec<TeamState> {
    let mut teams = TeamState::roster(config.roster_size);
    for round in rounds {
        resolve_round(&mut teams, round, config);
    }
    tracing::debug!(
        rounds = rounds.len(),
        teams = teams.len(),
        "Replayed round history"
    );
    teams
}

/// Like [`replay`], also returning what each round did.
pub fn replay_with_events(
    rounds: &[Round],
    config: &EngineConfig,
) -> (Vec<TeamState>, Vec<RoundReport>) {
    let mut teams = TeamState::roster(config.roster_size);
    let reports = rounds
        .iter()
        .map(|round| RoundReport {
            round_id: round.id,
            events: resolve_round(&mut teams, round, config),
        })
        .collect();
    (teams, reports)
}

/// Replay and rank in one step.
pub fn standings(rounds: &[Round], config: &EngineConfig, field: ScoreField) -> Standings {
    Standings::from_teams(&replay(rounds, config), field)
}
