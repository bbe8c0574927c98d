use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::state::TileGrid;
use crate::types::TickInput;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to reproduce a run: the seed, the level it ran on, and
/// one input per simulated tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub map_hash: u64,
    pub seed: u64,
    pub inputs: Vec<TickInput>,
}

impl InputJournal {
    pub fn new(seed: u64, grid: &TileGrid) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            map_hash: map_hash(grid),
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn append_tick(&mut self, input: TickInput) {
        self.inputs.push(input);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Content hash of a level as it looks before spawn markers are consumed.
pub fn map_hash(grid: &TileGrid) -> u64 {
    xxh3_64(grid.to_csv().as_bytes())
}
