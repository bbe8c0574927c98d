use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct AgentId;
}

/// Grid index of a cell: `y` is the row, `x` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Micro-step progress from the owning cell toward the next cell on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn on(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Cardinal heading. `Up` decreases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }

    pub fn step(self, pos: Pos) -> Pos {
        match self {
            Direction::Left => Pos { y: pos.y, x: pos.x - 1 },
            Direction::Right => Pos { y: pos.y, x: pos.x + 1 },
            Direction::Up => Pos { y: pos.y - 1, x: pos.x },
            Direction::Down => Pos { y: pos.y + 1, x: pos.x },
        }
    }

    /// Resolves a direction vector to one heading. Left, right, up, down are
    /// checked in that order, so horizontal input wins ties.
    pub fn dominant(dx: i32, dy: i32) -> Option<Direction> {
        if dx < 0 {
            Some(Direction::Left)
        } else if dx > 0 {
            Some(Direction::Right)
        } else if dy < 0 {
            Some(Direction::Up)
        } else if dy > 0 {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn between(from: Pos, to: Pos) -> Option<Direction> {
        Direction::dominant(to.x - from.x, to.y - from.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heuristic {
    Manhattan,
    Euclidean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    Idle,
    Patrol,
    Chase,
    Hunting,
    Stunned,
    FlareFollow,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 6] = [
        BehaviorState::Idle,
        BehaviorState::Patrol,
        BehaviorState::Chase,
        BehaviorState::Hunting,
        BehaviorState::Stunned,
        BehaviorState::FlareFollow,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentKind {
    Player,
    Pet,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKey {
    Lives,
    Item,
    Whistle,
}

/// The single carried consumable; the player holds at most one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldItem {
    Flare,
    Cereal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

pub mod sounds {
    use super::SoundId;

    pub const BELL: SoundId = SoundId(1);
    pub const DEATH: SoundId = SoundId(2);
    pub const DONE: SoundId = SoundId(3);
    pub const BGM: SoundId = SoundId(4);
    pub const ENEMY_ATTACK: SoundId = SoundId(5);
    pub const ENEMY_GROWL: SoundId = SoundId(6);
    pub const ENEMY_GROWL_ALT: SoundId = SoundId(7);
    pub const ENEMY_CRY: SoundId = SoundId(8);
    pub const JUMPSCARE: SoundId = SoundId(10);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Settings,
    PlayGame,
    Jumpscare,
    LoseWin,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Menu => "MenuState",
            Screen::Settings => "SettingMenuState",
            Screen::PlayGame => "PlayGameState",
            Screen::Jumpscare => "JumpscareState",
            Screen::LoseWin => "LoseWinState",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefeatCause {
    Caught,
    OutOfLives,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat(DefeatCause),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    StateChanged { from: BehaviorState, to: BehaviorState },
    RouteExhausted { from: Pos, target: Pos },
    ItemPickedUp { item: HeldItem },
    ItemDropped { item: HeldItem, pos: Pos },
    LivesChanged { lives: i32 },
    WhistleBlown { remaining: i32 },
    PetCalled,
    FlareConsumed { pos: Pos },
    EnemyStunned { pos: Pos },
    PlayerCaptured,
    PetCaptured,
    ExitReached,
    InputReset,
    PlaySound(SoundId),
    StopSound(SoundId),
    ScreenRequested(Screen),
}

/// Player input for one tick. `whistle` and the drop flags are edge-triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_x: i8,
    pub move_y: i8,
    pub whistle: bool,
    pub drop_flare: bool,
    pub drop_cereal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Finished(RunOutcome),
}

/// Ordered waypoints produced by the pathfinder. Never contains the start cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route(Vec<Pos>);

impl Route {
    pub fn new(cells: Vec<Pos>) -> Self {
        Self(cells)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn cells(&self) -> &[Pos] {
        &self.0
    }

    pub fn first(&self) -> Option<Pos> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Pos> {
        self.0.last().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    OutOfRange { row: i32, col: i32 },
    RaggedRow { row: usize, expected: usize, found: usize },
    BadCell { row: usize, col: usize, text: String },
    Empty,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfRange { row, col } => {
                write!(f, "grid index out of range: row {row}, col {col}")
            }
            GridError::RaggedRow { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            GridError::BadCell { row, col, text } => {
                write!(f, "cell at row {row}, col {col} is not a tile code: {text:?}")
            }
            GridError::Empty => write!(f, "map has no rows"),
        }
    }
}

impl Error for GridError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    MissingSpawn { marker: i32 },
    Grid(GridError),
    InvalidTuning(&'static str),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::MissingSpawn { marker } => {
                write!(f, "map has no spawn marker with code {marker}")
            }
            InitError::Grid(err) => write!(f, "map error during init: {err}"),
            InitError::InvalidTuning(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl Error for InitError {}

impl From<GridError> for InitError {
    fn from(err: GridError) -> Self {
        InitError::Grid(err)
    }
}
