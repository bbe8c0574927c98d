pub mod content;
pub mod game;
pub mod journal;
pub mod movement;
pub mod pathfinding;
pub mod replay;
pub mod state;
pub mod tiles;
pub mod types;

pub use content::{DEFAULT_LEVEL, Tuning, TuningError};
pub use game::{Game, capture_check, distance_between};
pub use journal::InputJournal;
pub use pathfinding::{find_path, straight_run};
pub use replay::*;
pub use state::{Agent, EnemyBrain, GameState, Inventory, ItemCounter, TileGrid};
pub use tiles::{SpawnMarker, Tile};
pub use types::*;
