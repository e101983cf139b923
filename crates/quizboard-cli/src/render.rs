//! Plain-text views printed by the CLI.

use std::fmt::Write;

use quizboard_core::replay::RoundReport;
use quizboard_core::resolver::{RoundEvent, SkipReason};
use quizboard_core::{CardPreset, Standings};

/// Ranked leaderboard, one team per line.
pub fn standings_table(standings: &Standings) -> String {
    let mut out = format!("Standings by {} score\n", standings.field);
    let _ = writeln!(
        out,
        "{:>4}  {:<8} {:>5}  {:>5}  {:>5}",
        "rank", "team", "total", "base", "items"
    );
    for team in &standings.teams {
        let _ = writeln!(
            out,
            "{:>4}  {:<8} {:>5}  {:>5}  {:>+5}",
            team.rank,
            format!("Team {}", team.id),
            team.total_score,
            team.base_score,
            team.item_diff
        );
    }
    out
}

/// Round-by-round account of what every card did.
pub fn event_log(reports: &[RoundReport]) -> String {
    if reports.is_empty() {
        return "No rounds recorded\n".to_string();
    }
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "Round {}", report.round_id);
        if report.events.is_empty() {
            out.push_str("  nothing scored\n");
        }
        for event in &report.events {
            let _ = writeln!(out, "  {}", describe(event));
        }
    }
    out
}

pub fn describe(event: &RoundEvent) -> String {
    match *event {
        RoundEvent::Scored { team_id, points } => {
            format!("Team {team_id} answered correctly (+{points})")
        },
        RoundEvent::Bonus { team_id, amount } => format!("Team {team_id} took a bonus of {amount}"),
        RoundEvent::Stole {
            team_id,
            target_id,
            amount,
        } => format!("Team {team_id} stole {amount} from Team {target_id}"),
        RoundEvent::Absorbed { team_id, target_id } => {
            format!("Team {target_id} blocked an attack from Team {team_id}")
        },
        RoundEvent::Overtook {
            team_id,
            passed_id,
            from_score,
            to_score,
        } => format!(
            "Team {team_id} overtook Team {passed_id} ({from_score} -> {to_score})"
        ),
        RoundEvent::OvertakeBlocked { team_id, blocker_id } => {
            format!("Team {team_id} was stopped by Team {blocker_id}'s defense")
        },
        RoundEvent::OvertakeOutOfRange { team_id, steps } => {
            format!("Team {team_id} had no team {steps} places above to overtake")
        },
        RoundEvent::CardSkipped {
            team_id,
            kind,
            reason,
        } => format!(
            "Team {team_id}'s {kind:?} card was ignored: {}",
            skip_reason(reason)
        ),
    }
}

fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::UnknownTeam => "team is not on the roster",
        SkipReason::MissingTarget => "no target given",
        SkipReason::UnknownTarget => "target is not on the roster",
        SkipReason::NonPositiveValue => "value must be positive",
        SkipReason::StepsTooShort => "overtake must reach at least two places",
        SkipReason::UnknownKind => "unknown card type",
    }
}

/// The preset catalog with the keys `--card` accepts.
pub fn card_catalog() -> String {
    let mut out = String::new();
    for preset in CardPreset::ALL {
        let arg = match preset {
            CardPreset::Attack1 | CardPreset::Attack2 | CardPreset::Attack3 => ":TARGET",
            CardPreset::Defense => "[:QTY]",
            _ => "",
        };
        let _ = writeln!(out, "{:<20} {}", format!("{}{arg}", preset.key()), preset.label());
    }
    out
}
