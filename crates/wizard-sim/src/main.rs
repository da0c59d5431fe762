use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wizard_core::model::score::RewardMode;
use wizard_sim::config::SimConfig;
use wizard_sim::SimRunner;

/// Random-playout harness for the Wizard engine.
#[derive(Debug, Parser)]
#[command(name = "wizard-sim", about = "Deterministic Wizard playout harness")]
struct Cli {
    /// Number of seats at the table.
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Cards per hand (the round number).
    #[arg(long, default_value_t = 1)]
    round: usize,

    /// Seat that receives the first card and bids first.
    #[arg(long, default_value_t = 0)]
    start_player: usize,

    /// 0 = normal scoring, 1 = binary.
    #[arg(long, default_value_t = 0)]
    reward_mode: usize,

    #[arg(long, default_value_t = 100)]
    episodes: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Check resampling consistency every N moves (0 disables).
    #[arg(long, default_value_t = 0)]
    resample_every: usize,

    /// Write per-episode JSONL rows to this path.
    #[arg(long, value_name = "FILE")]
    jsonl: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let reward_mode = RewardMode::from_index(cli.reward_mode)
        .ok_or_else(|| anyhow::anyhow!("reward_mode must be 0 or 1"))?;
    let config = SimConfig {
        players: cli.players,
        round: cli.round,
        start_player: cli.start_player,
        reward_mode,
        episodes: cli.episodes,
        seed: cli.seed,
        resample_every: cli.resample_every,
    };

    let runner = SimRunner::new(config)?;
    let report = runner.run()?;
    tracing::info!(
        episodes = report.episodes.len(),
        mean_returns = ?report.mean_returns,
        "simulation finished"
    );

    if let Some(path) = cli.jsonl {
        let file = File::create(&path)
            .with_context(|| format!("creating JSONL output at {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for record in &report.episodes {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    Ok(())
}
