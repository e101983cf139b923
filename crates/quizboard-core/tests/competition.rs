//! Whole-competition scenarios driven through the public API.

mod common;

use quizboard_core::document::GameDocument;
use quizboard_core::replay::replay_with_events;
use quizboard_core::resolver::{RoundEvent, SkipReason};
use quizboard_core::snapshot::{decode_standings, encode_standings};
use quizboard_core::{Card, EngineConfig, RoundLog, ScoreField, replay, standings};

use common::{board, round};

#[test]
fn two_round_attack_on_default_roster() {
    let rounds = vec![
        round(1, 2, &[1, 3], vec![]),
        round(2, 1, &[2], vec![Card::attack(1, 1, 3)]),
    ];
    let result = standings(&rounds, &EngineConfig::default(), ScoreField::Total);

    assert_eq!(result.teams.len(), 12);
    assert_eq!(
        board(&result.teams[..4]),
        vec![(1, 3, 1), (2, 1, 2), (3, 1, 2), (4, 0, 4)]
    );
    assert!(result.teams[3..].iter().all(|t| t.rank == 4));
}

fn evening() -> Vec<quizboard_core::Round> {
    vec![
        round(1, 3, &[1, 2, 3], vec![]),
        round(2, 2, &[4, 5], vec![Card::plus(6, 3)]),
        round(
            3,
            1,
            &[1],
            vec![
                Card::defense(1, 1),
                Card::attack(2, 3, 1),
                Card::attack(4, 2, 3),
                Card::overtake(5, 3),
            ],
        ),
        round(
            4,
            2,
            &[3, 6],
            vec![
                Card::defense(2, 2),
                Card::overtake(3, 3),
                Card::overtake(4, 2),
            ],
        ),
    ]
}

#[test]
fn full_evening_with_every_card_kind() {
    let config = EngineConfig::with_roster(6);
    let rounds = evening();

    let by_total = standings(&rounds, &config, ScoreField::Total);
    assert_eq!(
        board(&by_total.teams),
        vec![
            (4, 5, 1),
            (6, 5, 1),
            (1, 4, 3),
            (5, 4, 3),
            (2, 3, 5),
            (3, 3, 5),
        ]
    );

    let by_base = standings(&rounds, &config, ScoreField::Base);
    let base: Vec<(u32, i32, u32)> = by_base
        .teams
        .iter()
        .map(|t| (t.id, t.base_score, t.rank))
        .collect();
    assert_eq!(
        base,
        vec![(3, 5, 1), (1, 4, 2), (2, 3, 3), (4, 2, 4), (5, 2, 4), (6, 2, 4)]
    );

    let teams = replay(&rounds, &config);
    let diffs: Vec<i32> = teams.iter().map(|t| t.item_diff).collect();
    assert_eq!(diffs, vec![0, 0, -2, 3, 2, 3]);
}

#[test]
fn evening_events_explain_blocks_and_absorbs() {
    let (_, reports) = replay_with_events(&evening(), &EngineConfig::with_roster(6));

    assert!(reports[2].events.contains(&RoundEvent::Absorbed {
        team_id: 2,
        target_id: 1,
    }));
    assert!(reports[2].events.contains(&RoundEvent::Overtook {
        team_id: 5,
        passed_id: 2,
        from_score: 2,
        to_score: 4,
    }));
    assert!(reports[3].events.contains(&RoundEvent::OvertakeBlocked {
        team_id: 3,
        blocker_id: 2,
    }));
}

#[test]
fn bad_record_mid_history_does_not_stop_replay() {
    let rounds = vec![
        round(1, 2, &[1], vec![]),
        round(2, 1, &[2], vec![Card::attack(0, 3, 1), Card::attack(2, 1, 42)]),
        round(3, 1, &[3], vec![Card::plus(3, 1)]),
    ];
    let (teams, reports) = replay_with_events(&rounds, &EngineConfig::with_roster(3));
    let totals: Vec<i32> = teams.iter().map(|t| t.total_score).collect();
    assert_eq!(totals, vec![2, 1, 2]);

    let skipped: Vec<SkipReason> = reports[1]
        .events
        .iter()
        .filter_map(|e| match e {
            RoundEvent::CardSkipped { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        skipped,
        vec![SkipReason::UnknownTeam, SkipReason::UnknownTarget]
    );
}

#[test]
fn stored_document_and_in_memory_log_agree() {
    let config = EngineConfig::with_roster(6);
    let log = RoundLog::from_rounds(evening());
    let text = GameDocument::from_log(&log).to_json_pretty().unwrap();

    let restored = GameDocument::from_json(&text).unwrap().into_log();
    let direct = log.standings(&config, ScoreField::Total);
    let reloaded = restored.standings(&config, ScoreField::Total);

    assert_eq!(direct, reloaded);
    assert_eq!(
        direct.fingerprint().unwrap(),
        reloaded.fingerprint().unwrap()
    );

    let frame = encode_standings(&reloaded).unwrap();
    assert_eq!(decode_standings(&frame).unwrap(), direct);
}

#[test]
fn rule_variants_change_outcomes() {
    use quizboard_core::{DefenseStacking, OvertakeBlocking};

    // Team 1 guards the top; team 4 tries to pass team 3.
    let rounds = vec![
        round(1, 5, &[1], vec![]),
        round(2, 3, &[2, 3], vec![]),
        round(3, 1, &[4], vec![Card::defense(1, 1), Card::overtake(4, 2)]),
    ];

    let canonical = replay(&rounds, &EngineConfig::with_roster(4));
    assert_eq!(canonical[3].total_score, 1);

    let windowed = EngineConfig {
        roster_size: 4,
        overtake_block: OvertakeBlocking::WithinWindow,
        ..EngineConfig::default()
    };
    assert_eq!(replay(&rounds, &windowed)[3].total_score, 4);

    let stacked = vec![round(
        1,
        4,
        &[2],
        vec![
            Card::defense(2, 2),
            Card::attack(1, 1, 2),
            Card::attack(1, 1, 2),
        ],
    )];
    let binary = EngineConfig {
        roster_size: 2,
        defense: DefenseStacking::Binary,
        ..EngineConfig::default()
    };
    assert_eq!(replay(&stacked, &EngineConfig::with_roster(2))[1].total_score, 4);
    assert_eq!(replay(&stacked, &binary)[1].total_score, 3);
}
