//! Per-round resolution: base points, defense charges, attacks and bonuses,
//! then rank-jump overtakes against the post-attack order.

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardKind};
use crate::config::{DefenseStacking, EngineConfig, OvertakeBlocking};
use crate::ranking::{ScoreField, sorted_indices};
use crate::round::Round;
use crate::team::{TeamId, TeamState, position_of};

/// Why a card was ignored during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownTeam,
    MissingTarget,
    UnknownTarget,
    NonPositiveValue,
    StepsTooShort,
    UnknownKind,
}

/// Effects produced while resolving a round, in the order they were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Scored {
        team_id: TeamId,
        points: i32,
    },
    Bonus {
        team_id: TeamId,
        amount: i32,
    },
    Stole {
        team_id: TeamId,
        target_id: TeamId,
        amount: i32,
    },
    Absorbed {
        team_id: TeamId,
        target_id: TeamId,
    },
    Overtook {
        team_id: TeamId,
        passed_id: TeamId,
        from_score: i32,
        to_score: i32,
    },
    OvertakeBlocked {
        team_id: TeamId,
        blocker_id: TeamId,
    },
    OvertakeOutOfRange {
        team_id: TeamId,
        steps: i32,
    },
    CardSkipped {
        team_id: TeamId,
        kind: CardKind,
        reason: SkipReason,
    },
}

/// Apply one round to the roster and return what happened.
///
/// Never fails: malformed cards are skipped and reported as
/// [`RoundEvent::CardSkipped`] so the rest of the history still replays.
pub fn resolve_round(
    teams: &mut [TeamState],
    round: &Round,
    config: &EngineConfig,
) -> Vec<RoundEvent> {
    let mut events = Vec::new();

    for team in teams.iter_mut() {
        team.defense_charge = 0;
    }

    score_winners(teams, round, &mut events);
    accumulate_defense(teams, round, config.defense, &mut events);

    for card in &round.cards {
        match card.kind {
            CardKind::Plus => apply_plus(teams, card, &mut events),
            CardKind::Attack => apply_attack(teams, card, &mut events),
            CardKind::Unknown => skip(&mut events, card, SkipReason::UnknownKind),
            _ => {},
        }
    }

    for card in round.cards_of(CardKind::Overtake) {
        apply_overtake(teams, card, config.overtake_block, &mut events);
    }

    // Charges are round-scoped.
    for team in teams.iter_mut() {
        team.defense_charge = 0;
    }

    events
}

fn skip(events: &mut Vec<RoundEvent>, card: &Card, reason: SkipReason) {
    tracing::warn!(
        team_id = card.team_id,
        kind = ?card.kind,
        value = card.value,
        target_id = ?card.target_id,
        ?reason,
        "Skipping malformed card"
    );
    events.push(RoundEvent::CardSkipped {
        team_id: card.team_id,
        kind: card.kind,
        reason,
    });
}

fn score_winners(teams: &mut [TeamState], round: &Round, events: &mut Vec<RoundEvent>) {
    if round.points <= 0 {
        tracing::warn!(
            round_id = round.id,
            points = round.points,
            "Round has non-positive points, no base score awarded"
        );
        return;
    }
    for team in teams.iter_mut().filter(|t| round.is_winner(t.id)) {
        team.credit(round.points);
        events.push(RoundEvent::Scored {
            team_id: team.id,
            points: round.points,
        });
    }
    for unknown in round
        .winners
        .iter()
        .filter(|id| position_of(teams, **id).is_none())
    {
        tracing::warn!(round_id = round.id, team_id = unknown, "Winner not on roster");
    }
}

fn accumulate_defense(
    teams: &mut [TeamState],
    round: &Round,
    stacking: DefenseStacking,
    events: &mut Vec<RoundEvent>,
) {
    for card in round.cards_of(CardKind::Defense) {
        let Some(index) = position_of(teams, card.team_id) else {
            skip(events, card, SkipReason::UnknownTeam);
            continue;
        };
        if card.value <= 0 {
            skip(events, card, SkipReason::NonPositiveValue);
            continue;
        }
        let team = &mut teams[index];
        team.defense_charge = match stacking {
            DefenseStacking::Additive => team.defense_charge.saturating_add(card.value as u32),
            DefenseStacking::Binary => 1,
        };
        tracing::debug!(
            team_id = team.id,
            charges = team.defense_charge,
            "Defense charged"
        );
    }
}

fn apply_plus(teams: &mut [TeamState], card: &Card, events: &mut Vec<RoundEvent>) {
    let Some(index) = position_of(teams, card.team_id) else {
        skip(events, card, SkipReason::UnknownTeam);
        return;
    };
    if card.value <= 0 {
        skip(events, card, SkipReason::NonPositiveValue);
        return;
    }
    teams[index].adjust_items(card.value);
    events.push(RoundEvent::Bonus {
        team_id: card.team_id,
        amount: card.value,
    });
}

fn apply_attack(teams: &mut [TeamState], card: &Card, events: &mut Vec<RoundEvent>) {
    let Some(caster) = position_of(teams, card.team_id) else {
        skip(events, card, SkipReason::UnknownTeam);
        return;
    };
    if card.value <= 0 {
        skip(events, card, SkipReason::NonPositiveValue);
        return;
    }
    let Some(target_id) = card.target_id else {
        skip(events, card, SkipReason::MissingTarget);
        return;
    };
    let Some(target) = position_of(teams, target_id) else {
        skip(events, card, SkipReason::UnknownTarget);
        return;
    };

    if teams[target].consume_charge() {
        tracing::debug!(
            team_id = card.team_id,
            target_id,
            "Attack absorbed by defense"
        );
        events.push(RoundEvent::Absorbed {
            team_id: card.team_id,
            target_id,
        });
        return;
    }

    // Totals never go negative, so the victim can always cover `steal`.
    let steal = card.value.min(teams[target].total_score).max(0);
    teams[target].adjust_items(-steal);
    teams[caster].adjust_items(steal);
    tracing::debug!(team_id = card.team_id, target_id, steal, "Attack landed");
    events.push(RoundEvent::Stole {
        team_id: card.team_id,
        target_id,
        amount: steal,
    });
}

fn apply_overtake(
    teams: &mut [TeamState],
    card: &Card,
    blocking: OvertakeBlocking,
    events: &mut Vec<RoundEvent>,
) {
    let Some(caster) = position_of(teams, card.team_id) else {
        skip(events, card, SkipReason::UnknownTeam);
        return;
    };
    if card.value < 2 {
        skip(events, card, SkipReason::StepsTooShort);
        return;
    }

    // Fresh snapshot per card so earlier overtakes in this round are visible.
    let order = sorted_indices(teams, ScoreField::Total);
    let Some(my_index) = order.iter().position(|&i| i == caster) else {
        return;
    };
    let reach = (card.value - 1) as usize;
    if reach > my_index {
        tracing::debug!(
            team_id = card.team_id,
            steps = card.value,
            position = my_index + 1,
            "Overtake has no team to pass"
        );
        events.push(RoundEvent::OvertakeOutOfRange {
            team_id: card.team_id,
            steps: card.value,
        });
        return;
    }
    let target_index = my_index - reach;

    let guard_start = match blocking {
        OvertakeBlocking::FirstAbove => 0,
        OvertakeBlocking::WithinWindow => target_index,
    };
    for &guard in &order[guard_start..my_index] {
        if teams[guard].consume_charge() {
            let blocker_id = teams[guard].id;
            tracing::debug!(team_id = card.team_id, blocker_id, "Overtake blocked");
            events.push(RoundEvent::OvertakeBlocked {
                team_id: card.team_id,
                blocker_id,
            });
            return;
        }
    }

    let passed = &teams[order[target_index]];
    let passed_id = passed.id;
    let to_score = passed.total_score.saturating_add(1);
    let from_score = teams[caster].total_score;
    teams[caster].set_total(to_score);
    tracing::debug!(
        team_id = card.team_id,
        passed_id,
        from_score,
        to_score,
        "Overtake applied"
    );
    events.push(RoundEvent::Overtook {
        team_id: card.team_id,
        passed_id,
        from_score,
        to_score,
    });
}
