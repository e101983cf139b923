//! `--card TEAM:PRESET[:ARG]` arguments.
//!
//! `ARG` is the attack target for attack presets and the charge count for
//! defense. Other presets take no argument.

use std::str::FromStr;

use quizboard_core::intent::RoundDraft;
use quizboard_core::{CardKind, CardPreset, TeamId};

use crate::error::CliError;

/// One team's card as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub team_id: TeamId,
    pub preset: CardPreset,
    pub arg: Option<u32>,
}

impl FromStr for CardSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (team, preset, arg) = match parts.as_slice() {
            [team, preset] => (*team, *preset, None),
            [team, preset, arg] => (*team, *preset, Some(*arg)),
            _ => return Err(format!("expected TEAM:PRESET[:ARG], got {s:?}")),
        };

        let team_id = team
            .parse()
            .map_err(|_| format!("team id is not a number: {team:?}"))?;
        let preset: CardPreset = preset.parse().map_err(|e| format!("{e}"))?;
        let arg = arg
            .map(|a| a.parse().map_err(|_| format!("card argument is not a number: {a:?}")))
            .transpose()?;

        match (preset.kind(), arg) {
            (CardKind::Attack, None) => Err(format!("{preset} needs a target team: {s:?}")),
            (CardKind::None | CardKind::Plus | CardKind::Overtake, Some(_)) => {
                Err(format!("{preset} takes no argument: {s:?}"))
            },
            _ => Ok(Self {
                team_id,
                preset,
                arg,
            }),
        }
    }
}

impl CardSpec {
    /// Check both ends of the card against a roster of `roster_size` teams.
    pub fn validate(&self, roster_size: u32) -> Result<(), CliError> {
        let on_roster = |id: TeamId| (1..=roster_size).contains(&id);
        if !on_roster(self.team_id) {
            return Err(CliError::InvalidCard(format!(
                "team {} is not on the roster (1..={roster_size})",
                self.team_id
            )));
        }
        if self.preset.kind() == CardKind::Attack
            && let Some(target) = self.arg
        {
            if !on_roster(target) {
                return Err(CliError::InvalidCard(format!(
                    "attack target {target} is not on the roster (1..={roster_size})"
                )));
            }
            if target == self.team_id {
                return Err(CliError::InvalidCard(format!(
                    "team {target} cannot attack itself"
                )));
            }
        }
        if self.preset.kind() == CardKind::Defense && self.arg == Some(0) {
            return Err(CliError::InvalidCard(
                "defense needs at least one charge".to_string(),
            ));
        }
        Ok(())
    }

    /// Select this card in the team's intent slot.
    pub fn apply(&self, draft: RoundDraft) -> RoundDraft {
        let preset = self.preset;
        let arg = self.arg;
        draft.with_intent(self.team_id, |intent| {
            let intent = intent.with_preset(preset);
            match (preset.kind(), arg) {
                (CardKind::Attack, Some(target)) => intent.with_target(target),
                (CardKind::Defense, Some(quantity)) => intent.with_defense_quantity(quantity),
                _ => intent,
            }
        })
    }
}

/// Build a draft from command-line inputs, one card per team at most.
pub fn build_draft(
    roster_size: u32,
    points: i32,
    winners: &[TeamId],
    cards: &[CardSpec],
) -> Result<RoundDraft, CliError> {
    let mut draft = RoundDraft::new(roster_size).with_points(points);

    for &winner in winners {
        if !(1..=roster_size).contains(&winner) {
            return Err(CliError::InvalidRound(format!(
                "winner {winner} is not on the roster (1..={roster_size})"
            )));
        }
        if !draft.winners.contains(&winner) {
            draft = draft.toggle_winner(winner);
        }
    }

    for spec in cards {
        spec.validate(roster_size)?;
        let taken = draft
            .intent(spec.team_id)
            .is_some_and(|i| i.preset != CardPreset::None);
        if taken {
            return Err(CliError::InvalidCard(format!(
                "team {} already plays a card this round",
                spec.team_id
            )));
        }
        draft = spec.apply(draft);
    }
    Ok(draft)
}
