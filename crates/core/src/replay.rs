use std::error::Error;
use std::fmt;

use crate::content::Tuning;
use crate::game::Game;
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION, map_hash};
use crate::state::TileGrid;
use crate::types::{InitError, RunOutcome, TickStatus};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnsupportedVersion(u16),
    MapMismatch { expected: u64, found: u64 },
    Init(InitError),
    /// The run ended before the journal did.
    TrailingInput { finished_at: u64, remaining: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::UnsupportedVersion(version) => {
                write!(f, "journal format version {version} is not supported")
            }
            ReplayError::MapMismatch { expected, found } => {
                write!(f, "journal was recorded on map {expected:016x}, replaying on {found:016x}")
            }
            ReplayError::Init(err) => write!(f, "could not start replay: {err}"),
            ReplayError::TrailingInput { finished_at, remaining } => write!(
                f,
                "run finished at tick {finished_at} with {remaining} journal inputs left over"
            ),
        }
    }
}

impl Error for ReplayError {}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    /// `None` when the journal ran out while the run was still going.
    pub final_outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
}

pub fn replay_to_end(
    grid: &TileGrid,
    tuning: &Tuning,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion(journal.format_version));
    }
    let found = map_hash(grid);
    if found != journal.map_hash {
        return Err(ReplayError::MapMismatch { expected: journal.map_hash, found });
    }

    let mut game =
        Game::new(journal.seed, grid.clone(), tuning.clone()).map_err(ReplayError::Init)?;
    let mut final_outcome = None;
    for (consumed, input) in journal.inputs.iter().enumerate() {
        if let TickStatus::Finished(outcome) = game.tick(input) {
            let remaining = journal.inputs.len() - consumed - 1;
            if remaining > 0 {
                return Err(ReplayError::TrailingInput {
                    finished_at: game.current_tick(),
                    remaining,
                });
            }
            final_outcome = Some(outcome);
        }
    }

    Ok(ReplayResult {
        final_outcome,
        final_snapshot_hash: game.snapshot_hash(),
        final_tick: game.current_tick(),
    })
}
