pub mod cards;
pub mod config;
pub mod error;
pub mod render;
pub mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use quizboard_core::replay::replay_with_events;
use quizboard_core::round::RoundId;
use quizboard_core::{ScoreField, TeamId};

use crate::cards::{CardSpec, build_draft};
use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "quizboard")]
#[command(about = "Score a quiz competition round by round", long_about = None)]
pub struct Cli {
    /// Game document to read and update
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Config file (defaults to $QUIZBOARD_CONFIG or ./quizboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the ranked leaderboard
    Standings {
        /// Score to rank by: total or base
        #[arg(long, default_value = "total")]
        view: ScoreField,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Only teams ranked this well or better
        #[arg(long)]
        top: Option<u32>,
    },

    /// Record a new round
    Add {
        /// Points for a correct answer
        #[arg(long, default_value_t = 1)]
        points: i32,

        /// Team that answered correctly (repeatable)
        #[arg(long = "winner")]
        winners: Vec<TeamId>,

        /// Item card as TEAM:PRESET[:TARGET|QTY] (repeatable)
        #[arg(long = "card")]
        cards: Vec<CardSpec>,
    },

    /// Delete a recorded round and recompute
    Remove {
        id: RoundId,
    },

    /// Delete every round
    Reset,

    /// Walk through what each round did
    Explain,

    /// Hash of the current standings
    Fingerprint {
        #[arg(long, default_value = "total")]
        view: ScoreField,
    },

    /// List the item card presets
    Cards,
}

/// Execute one command and return what should be printed.
pub fn run(cli: &Cli, config: &CliConfig) -> Result<String, CliError> {
    let path = cli.log.clone().unwrap_or_else(|| config.log_path.clone());
    let engine = &config.engine;

    match &cli.command {
        Command::Standings { view, json, top } => {
            let mut standings = store::load_log(&path)?.standings(engine, *view);
            if let Some(n) = top {
                standings.teams = standings.top(*n).cloned().collect();
            }
            if *json {
                let mut text = serde_json::to_string_pretty(&standings)
                    .map_err(|e| CliError::Output(e.to_string()))?;
                text.push('\n');
                Ok(text)
            } else {
                Ok(render::standings_table(&standings))
            }
        },
        Command::Add {
            points,
            winners,
            cards,
        } => {
            let draft = build_draft(engine.roster_size, *points, winners, cards)?;
            let mut log = store::load_log(&path)?;
            let id = log.push_draft(&draft)?;
            store::save_log(&path, &log)?;
            Ok(format!("Recorded round {id}\n"))
        },
        Command::Remove { id } => {
            let mut log = store::load_log(&path)?;
            log.remove(*id).ok_or(CliError::UnknownRound(*id))?;
            store::save_log(&path, &log)?;
            Ok(format!("Removed round {id}\n"))
        },
        Command::Reset => {
            let mut log = store::load_log(&path)?;
            let count = log.len();
            log.reset();
            store::save_log(&path, &log)?;
            Ok(format!("Cleared {count} rounds\n"))
        },
        Command::Explain => {
            let log = store::load_log(&path)?;
            let (_, reports) = replay_with_events(log.rounds(), engine);
            Ok(render::event_log(&reports))
        },
        Command::Fingerprint { view } => {
            let standings = store::load_log(&path)?.standings(engine, *view);
            Ok(format!("{}\n", standings.fingerprint()?))
        },
        Command::Cards => Ok(render::card_catalog()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use quizboard_core::RoundLog;
    use quizboard_core::test_helpers::make_round;

    fn cli(log: &Path, args: &[&str]) -> Cli {
        let log = log.to_string_lossy().into_owned();
        let mut argv = vec!["quizboard", "--log", log.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn small_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.engine.roster_size = 3;
        config
    }

    #[test]
    fn add_then_standings() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        let out = run(
            &cli(&log, &["add", "--points", "2", "--winner", "1", "--winner", "3"]),
            &config,
        )
        .unwrap();
        assert_eq!(out, "Recorded round 1\n");
        let out = run(
            &cli(&log, &["add", "--winner", "2", "--card", "1:attack_1:3"]),
            &config,
        )
        .unwrap();
        assert_eq!(out, "Recorded round 2\n");

        let json = run(&cli(&log, &["standings", "--json"]), &config).unwrap();
        let standings: quizboard_core::Standings = serde_json::from_str(&json).unwrap();
        let board: Vec<(TeamId, i32, u32)> = standings
            .teams
            .iter()
            .map(|t| (t.id, t.total_score, t.rank))
            .collect();
        assert_eq!(board, vec![(1, 3, 1), (2, 1, 2), (3, 1, 2)]);
    }

    #[test]
    fn remove_recomputes_and_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        run(&cli(&log, &["add", "--winner", "1"]), &config).unwrap();
        run(&cli(&log, &["add", "--winner", "2"]), &config).unwrap();
        assert_eq!(
            run(&cli(&log, &["remove", "1"]), &config).unwrap(),
            "Removed round 1\n"
        );
        assert!(matches!(
            run(&cli(&log, &["remove", "1"]), &config),
            Err(CliError::UnknownRound(1))
        ));

        let standings = store::load_log(&log)
            .unwrap()
            .standings(&config.engine, ScoreField::Total);
        assert_eq!(standings.teams[0].id, 2);
    }

    #[test]
    fn reset_empties_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        run(&cli(&log, &["add", "--winner", "1"]), &config).unwrap();
        assert_eq!(
            run(&cli(&log, &["reset"]), &config).unwrap(),
            "Cleared 1 rounds\n"
        );
        assert!(store::load_log(&log).unwrap().is_empty());
    }

    #[test]
    fn rejected_card_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        let result = run(&cli(&log, &["add", "--card", "1:attack_2:1"]), &config);
        assert!(matches!(result, Err(CliError::InvalidCard(_))));
        assert!(!log.exists());
    }

    #[test]
    fn top_limits_the_board() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        run(&cli(&log, &["add", "--winner", "2"]), &config).unwrap();
        let json = run(&cli(&log, &["standings", "--json", "--top", "1"]), &config).unwrap();
        let standings: quizboard_core::Standings = serde_json::from_str(&json).unwrap();
        assert_eq!(standings.teams.len(), 1);
        assert_eq!(standings.teams[0].id, 2);
    }

    #[test]
    fn fingerprint_ignores_round_ids() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        let config = small_config();

        run(&cli(&first, &["add", "--winner", "3"]), &config).unwrap();
        run(&cli(&second, &["add", "--winner", "1"]), &config).unwrap();
        run(&cli(&second, &["add", "--winner", "3"]), &config).unwrap();
        run(&cli(&second, &["remove", "1"]), &config).unwrap();

        assert_eq!(
            run(&cli(&first, &["fingerprint"]), &config).unwrap(),
            run(&cli(&second, &["fingerprint"]), &config).unwrap()
        );
    }

    #[test]
    fn fingerprint_is_one_hex_digest() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let config = small_config();

        run(&cli(&log, &["add", "--winner", "2"]), &config).unwrap();
        let out = run(&cli(&log, &["fingerprint"]), &config).unwrap();
        let digest = out.trim_end();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));

        let standings = store::load_log(&log)
            .unwrap()
            .standings(&config.engine, ScoreField::Total);
        assert_eq!(digest, standings.fingerprint().unwrap());
    }

    #[test]
    fn exhausted_round_ids_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("game.json");
        let full = RoundLog::from_rounds(vec![make_round(u64::MAX, 1, &[1], vec![])]);
        store::save_log(&log, &full).unwrap();

        let result = run(&cli(&log, &["add", "--winner", "1"]), &small_config());
        assert!(matches!(result, Err(CliError::InvalidRound(_))));
        assert_eq!(store::load_log(&log).unwrap().len(), 1);
    }

    #[test]
    fn explain_on_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(&cli(&dir.path().join("none.json"), &["explain"]), &small_config()).unwrap();
        assert_eq!(out, "No rounds recorded\n");
    }

    #[test]
    fn view_flag_parses_base() {
        let parsed = Cli::try_parse_from(["quizboard", "standings", "--view", "base"]).unwrap();
        assert!(matches!(
            parsed.command,
            Command::Standings {
                view: ScoreField::Base,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["quizboard", "standings", "--view", "items"]).is_err());
    }
}
