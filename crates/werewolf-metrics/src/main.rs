//! CLI entry point for werewolf-assess.
//!
//! Reads a JSON document from stdin and writes a JSON result to stdout.
//! Logs go to stderr.

use std::collections::BTreeMap;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use werewolf_core::config::load_game_config;
use werewolf_core::{Alignment, PlayerCard, PlayerId, Role};
use werewolf_metrics::{build_metrics, MetricsReport};
use werewolf_referee::{build_record, FinalResultSpec, GameRecord, PhaseSpec};

#[derive(Parser)]
#[command(name = "werewolf-assess")]
#[command(about = "Referee a werewolf match and score its players")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: werewolf).
    #[arg(short, long, default_value = "werewolf", global = true)]
    config: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Referee a match description and score it (reads JSON from stdin).
    Assess,
    /// Score a sealed game record (reads JSON from stdin).
    Metrics,
}

/// A player seated at the table with their secret role.
#[derive(Deserialize)]
struct SeatedPlayer {
    #[serde(flatten)]
    card: PlayerCard,
    role: Role,
}

#[derive(Deserialize)]
struct MatchSpec {
    players: Vec<SeatedPlayer>,
    #[serde(default)]
    seed: u64,
    phases: Vec<PhaseSpec>,
    #[serde(default)]
    final_result: FinalResultSpec,
}

#[derive(Serialize)]
struct Assessment {
    record: GameRecord,
    metrics: MetricsReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let input = std::io::read_to_string(std::io::stdin())?;

    match cli.command {
        Command::Assess => {
            let spec: MatchSpec =
                serde_json::from_str(&input).context("invalid match description")?;
            let config = load_game_config(&cli.config)?;

            let mut roles: BTreeMap<PlayerId, Role> = BTreeMap::new();
            let mut alignments: BTreeMap<PlayerId, Alignment> = BTreeMap::new();
            let mut roster = Vec::with_capacity(spec.players.len());
            for seat in spec.players {
                roles.insert(seat.card.id.clone(), seat.role);
                alignments.insert(seat.card.id.clone(), seat.role.alignment());
                roster.push(seat.card);
            }

            let record = build_record(
                roster,
                roles,
                alignments,
                &spec.phases,
                &spec.final_result,
                spec.seed,
                config,
            )?;
            let metrics = build_metrics(&record);
            println!("{}", serde_json::to_string(&Assessment { record, metrics })?);
        }
        Command::Metrics => {
            let record: GameRecord =
                serde_json::from_str(&input).context("invalid game record")?;
            if !record.verify_integrity()? {
                bail!("game record {} is unsealed or has been modified", record.game_id);
            }
            let metrics = build_metrics(&record);
            println!("{}", serde_json::to_string(&metrics)?);
        }
    }

    Ok(())
}
