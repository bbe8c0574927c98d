use std::fmt::Write as _;

use slotmap::SlotMap;

use crate::tiles::{Tile, codes};
use crate::types::*;

/// Mutable grid of raw tile codes, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl TileGrid {
    /// Blank grid. A zero dimension gives a grid with no cells, where every access is out of range.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![codes::EMPTY; width * height] }
    }

    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let Some(width) = rows.first().map(Vec::len).filter(|width| *width > 0) else {
            return Err(GridError::Empty);
        };
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GridError::RaggedRow { row, expected: width, found: values.len() });
            }
            cells.extend(values);
        }
        Ok(Self { width, height, cells })
    }

    /// Parses the comma-separated level format: one row per line, blank lines skipped.
    pub fn from_csv(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row = rows.len();
            let mut values = Vec::new();
            for (col, cell) in line.split(',').map(str::trim).enumerate() {
                let value = cell.parse::<i32>().map_err(|_| GridError::BadCell {
                    row,
                    col,
                    text: cell.to_string(),
                })?;
                values.push(value);
            }
            rows.push(values);
        }
        Self::from_rows(rows)
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in self.cells.chunks(self.width.max(1)) {
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{value}");
            }
            out.push('\n');
        }
        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn get_tile(&self, row: i32, col: i32) -> Result<i32, GridError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set_tile(&mut self, row: i32, col: i32, value: i32) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn find_first_tile_with_value(&self, value: i32) -> Option<Pos> {
        self.cells.iter().position(|cell| *cell == value).map(|idx| Pos {
            y: (idx / self.width) as i32,
            x: (idx % self.width) as i32,
        })
    }

    pub fn tile_at(&self, pos: Pos) -> Result<Tile, GridError> {
        self.get_tile(pos.y, pos.x).map(Tile::from_code)
    }

    /// Out-of-range cells count as blocked.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_ok_and(Tile::is_passable)
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    fn index(&self, row: i32, col: i32) -> Result<usize, GridError> {
        if !self.in_bounds(Pos { y: row, x: col }) {
            return Err(GridError::OutOfRange { row, col });
        }
        Ok((row as usize) * self.width + (col as usize))
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
    pub pos: Pos,
    pub offset: Offset,
    pub speed: i32,
    pub heading: Option<Direction>,
    pub spawn: Pos,
}

impl Agent {
    pub fn new(kind: AgentKind, spawn: Pos, speed: i32) -> Self {
        Self {
            id: AgentId::default(),
            kind,
            pos: spawn,
            offset: Offset::default(),
            speed,
            heading: None,
            spawn,
        }
    }

    /// Pixel-space anchor for the render hook, folding the sub-tile offset in.
    pub fn pixel_position(
        &self,
        tile_width: f32,
        tile_height: f32,
        steps_per_tile: i32,
    ) -> (f32, f32) {
        let steps = steps_per_tile.max(1) as f32;
        let x = (self.pos.x as f32 + self.offset.x as f32 / steps) * tile_width;
        let y = (self.pos.y as f32 + self.offset.y as f32 / steps) * tile_height;
        (x, y)
    }

    pub fn is_aligned(&self) -> bool {
        self.offset == Offset::default()
    }
}

#[derive(Clone, Debug)]
pub struct EnemyBrain {
    pub state: BehaviorState,
    /// Ticks spent in `state`; zeroed on every transition.
    pub counter: u32,
    pub route: Route,
    pub destination: Option<Pos>,
    pub last_known_player: Pos,
    pub flare_target: Option<Pos>,
}

impl EnemyBrain {
    pub fn new(last_known_player: Pos) -> Self {
        Self {
            state: BehaviorState::Idle,
            counter: 0,
            route: Route::empty(),
            destination: None,
            last_known_player,
            flare_target: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemCounter {
    pub count: i32,
    pub max: i32,
}

impl ItemCounter {
    pub fn new(count: i32, max: i32) -> Self {
        Self { count: count.clamp(0, max), max }
    }
}

/// Clamped counters keyed by [`ItemKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    lives: ItemCounter,
    item: ItemCounter,
    whistle: ItemCounter,
}

impl Inventory {
    pub fn new(lives: ItemCounter, item: ItemCounter, whistle: ItemCounter) -> Self {
        Self { lives, item, whistle }
    }

    pub fn count(&self, key: ItemKey) -> i32 {
        self.counter(key).count
    }

    pub fn max(&self, key: ItemKey) -> i32 {
        self.counter(key).max
    }

    /// Applies `delta` clamped to `[0, max]` and returns the resulting count.
    pub fn adjust(&mut self, key: ItemKey, delta: i32) -> i32 {
        let counter = self.counter_mut(key);
        counter.count = counter.count.saturating_add(delta).clamp(0, counter.max);
        counter.count
    }

    fn counter(&self, key: ItemKey) -> &ItemCounter {
        match key {
            ItemKey::Lives => &self.lives,
            ItemKey::Item => &self.item,
            ItemKey::Whistle => &self.whistle,
        }
    }

    fn counter_mut(&mut self, key: ItemKey) -> &mut ItemCounter {
        match key {
            ItemKey::Lives => &mut self.lives,
            ItemKey::Item => &mut self.item,
            ItemKey::Whistle => &mut self.whistle,
        }
    }
}

pub struct GameState {
    pub grid: TileGrid,
    pub agents: SlotMap<AgentId, Agent>,
    pub player_id: AgentId,
    pub pet_id: AgentId,
    pub enemy_id: AgentId,
    pub brain: EnemyBrain,
    pub inventory: Inventory,
    pub held: Option<HeldItem>,
    /// Set by the whistle; the pet walks back to the player until it is close again.
    pub pet_called: bool,
}

impl GameState {
    pub fn player(&self) -> &Agent {
        &self.agents[self.player_id]
    }

    pub fn pet(&self) -> &Agent {
        &self.agents[self.pet_id]
    }

    pub fn enemy(&self) -> &Agent {
        &self.agents[self.enemy_id]
    }
}
