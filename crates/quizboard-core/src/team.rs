use serde::{Deserialize, Serialize};

/// Stable identity of a team on the roster (`1..=roster_size`).
pub type TeamId = u32;

/// Default roster size for a competition.
pub const DEFAULT_ROSTER_SIZE: u32 = 12;

/// Working score state of one team during a replay.
///
/// Teams are a derived view: a fresh roster is built at the start of every
/// replay and never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamState {
    pub id: TeamId,
    /// Points from correct answers only.
    pub base_score: i32,
    /// Score after every item effect.
    pub total_score: i32,
    /// Net item effect, always `total_score - base_score`.
    pub item_diff: i32,
    /// Unconsumed defense uses for the round being resolved.
    #[serde(skip)]
    pub defense_charge: u32,
}

impl TeamState {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            base_score: 0,
            total_score: 0,
            item_diff: 0,
            defense_charge: 0,
        }
    }

    /// Build a zeroed roster with ids `1..=size`.
    pub fn roster(size: u32) -> Vec<Self> {
        (1..=size).map(Self::new).collect()
    }

    /// Award points for a correct answer. Scores saturate at `i32::MAX`.
    pub fn credit(&mut self, points: i32) {
        self.base_score = self.base_score.saturating_add(points);
        self.total_score = self.total_score.saturating_add(points);
    }

    /// Apply an item effect of `delta` points.
    pub fn adjust_items(&mut self, delta: i32) {
        self.total_score = self.total_score.saturating_add(delta);
        self.item_diff = self.item_diff.saturating_add(delta);
    }

    /// Move the total to `value`, booking the difference as an item effect.
    pub fn set_total(&mut self, value: i32) {
        let delta = value.saturating_sub(self.total_score);
        self.adjust_items(delta);
    }

    /// Take one defense charge if any remain.
    pub fn consume_charge(&mut self) -> bool {
        if self.defense_charge > 0 {
            self.defense_charge -= 1;
            true
        } else {
            false
        }
    }
}

/// Find a team in a roster slice by id.
pub(crate) fn position_of(teams: &[TeamState], id: TeamId) -> Option<usize> {
    teams.iter().position(|t| t.id == id)
}
