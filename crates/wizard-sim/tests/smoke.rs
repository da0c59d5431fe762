use std::fs;

use tempfile::tempdir;
use wizard_core::model::score::RewardMode;
use wizard_sim::config::SimConfig;
use wizard_sim::SimRunner;

#[test]
fn sweep_across_player_counts_and_rounds() {
    for players in 3..=6 {
        for round in [1, 2] {
            let config = SimConfig {
                players,
                round,
                episodes: 3,
                seed: 7,
                resample_every: 3,
                ..SimConfig::default()
            };
            let report = SimRunner::new(config).unwrap().run().unwrap();
            assert_eq!(report.episodes.len(), 3);
            assert_eq!(report.mean_returns.len(), players);
        }
    }
}

#[test]
fn whole_deck_round_runs_clean() {
    let config = SimConfig {
        players: 3,
        round: 20,
        episodes: 1,
        seed: 1,
        ..SimConfig::default()
    };
    let report = SimRunner::new(config).unwrap().run().unwrap();
    // 60 deals, the forced trump, 3 bids, 60 plays
    assert_eq!(report.episodes[0].moves, 124);
}

#[test]
fn binary_runs_stay_in_sign_range() {
    let config = SimConfig {
        players: 5,
        round: 2,
        episodes: 4,
        seed: 13,
        reward_mode: RewardMode::Binary,
        ..SimConfig::default()
    };
    let report = SimRunner::new(config).unwrap().run().unwrap();
    for record in &report.episodes {
        assert!(record.returns.iter().all(|&r| r.abs() == 1.0));
    }
}

#[test]
fn report_rows_serialize_to_jsonl() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("episodes.jsonl");
    let config = SimConfig {
        players: 4,
        round: 2,
        episodes: 5,
        seed: 2,
        ..SimConfig::default()
    };
    let report = SimRunner::new(config).unwrap().run().unwrap();
    let rows: Vec<String> = report
        .episodes
        .iter()
        .map(|record| serde_json::to_string(record).unwrap())
        .collect();
    fs::write(&path, rows.join("\n")).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 5);
    assert!(written.lines().all(|line| line.contains("\"returns\"")));
}
