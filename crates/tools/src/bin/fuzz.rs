use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chase_core::{Game, InputJournal, LogEvent, TickInput, TickStatus};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use tools::{check_invariants, init_tracing, load_level, load_tuning};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    #[arg(short, long)]
    map: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the generated inputs as a journal the replay tool can re-run
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct SoakSummary {
    seed: u64,
    ticks: u64,
    outcome: Option<String>,
    snapshot_hash: String,
    state_changes: usize,
    pet_captures: usize,
    stuns: usize,
    whistles: usize,
}

impl SoakSummary {
    fn count(&mut self, events: &[LogEvent]) {
        for event in events {
            match event {
                LogEvent::StateChanged { .. } => self.state_changes += 1,
                LogEvent::PetCaptured => self.pet_captures += 1,
                LogEvent::EnemyStunned { .. } => self.stuns += 1,
                LogEvent::WhistleBlown { .. } => self.whistles += 1,
                _ => {}
            }
        }
    }
}

/// Mostly held movement with occasional item actions, like a player mashing keys.
fn random_input(rng: &mut ChaCha8Rng) -> TickInput {
    let axis = |roll: u64| (roll % 3) as i8 - 1;
    let action = rng.next_u64() % 64;
    TickInput {
        move_x: axis(rng.next_u64()),
        move_y: axis(rng.next_u64()),
        whistle: action == 0,
        drop_flare: action == 1,
        drop_cereal: action == 2,
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    log::info!("starting soak on seed {} for at most {} ticks", args.seed, args.ticks);
    let grid = load_level(args.map.as_deref())?;
    let tuning = load_tuning(args.config.as_deref())?;
    let mut journal = InputJournal::new(args.seed, &grid);
    let mut game = Game::new(args.seed, grid, tuning).context("level cannot start a run")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut summary = SoakSummary { seed: args.seed, ..SoakSummary::default() };

    for _ in 0..args.ticks {
        let input = random_input(&mut rng);
        journal.append_tick(input);
        let status = game.tick(&input);
        summary.count(&game.drain_events());
        check_invariants(&game)
            .with_context(|| format!("invariant broken on tick {}", game.current_tick()))?;
        if let TickStatus::Finished(outcome) = status {
            summary.outcome = Some(format!("{outcome:?}"));
            break;
        }
    }

    summary.ticks = game.current_tick();
    summary.snapshot_hash = format!("0x{:016x}", game.snapshot_hash());
    if let Some(path) = &args.journal_out {
        fs::write(path, journal.to_json()?)
            .with_context(|| format!("failed to write journal: {}", path.display()))?;
        log::info!("journal written to {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
