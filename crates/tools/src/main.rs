use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chase_core::{InputJournal, ReplayResult, replay_to_end};
use clap::Parser;
use tools::{init_tracing, load_level, load_tuning};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Level CSV the journal was recorded on; the built-in level when omitted
    #[arg(short, long)]
    map: Option<PathBuf>,
    /// Tuning TOML the journal was recorded with; defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal =
        InputJournal::from_json(&journal_data).context("Failed to deserialize journal JSON")?;
    let grid = load_level(args.map.as_deref())?;
    let tuning = load_tuning(args.config.as_deref())?;

    log::info!("replaying {} inputs on seed {}", journal.inputs.len(), journal.seed);
    let result: ReplayResult =
        replay_to_end(&grid, &tuning, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    match result.final_outcome {
        Some(outcome) => println!("Outcome: {outcome:?}"),
        None => println!("Outcome: unfinished"),
    }
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);

    Ok(())
}
