//! Tile-code vocabulary for level grids.
//! Raw cells stay `i32` so level files round-trip untouched; gameplay code
//! classifies them through [`Tile`] instead of comparing magic numbers.

pub mod codes {
    pub const EMPTY: i32 = 0;
    pub const FLARE_PICKUP: i32 = 2;
    pub const FLARE_DROPPED: i32 = 3;
    pub const CEREAL_PICKUP: i32 = 4;
    pub const CEREAL_DROPPED: i32 = 5;
    pub const LIFE_PICKUP: i32 = 10;
    pub const SPIKES: i32 = 20;
    pub const EXIT: i32 = 99;
    pub const OBSTACLE_MIN: i32 = 100;
    pub const SPAWN_MIN: i32 = 200;
    pub const PLAYER_SPAWN: i32 = 200;
    pub const PET_SPAWN: i32 = 250;
    pub const ENEMY_SPAWN: i32 = 300;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnMarker {
    Player,
    Pet,
    Enemy,
}

impl SpawnMarker {
    pub fn code(self) -> i32 {
        match self {
            SpawnMarker::Player => codes::PLAYER_SPAWN,
            SpawnMarker::Pet => codes::PET_SPAWN,
            SpawnMarker::Enemy => codes::ENEMY_SPAWN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    FlarePickup,
    FlareDropped,
    CerealPickup,
    CerealDropped,
    LifePickup,
    Spikes,
    Exit,
    Obstacle(i32),
    Spawn(SpawnMarker),
    /// Walkable decoration codes with no gameplay effect.
    Inert(i32),
}

impl Tile {
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::EMPTY => Tile::Empty,
            codes::FLARE_PICKUP => Tile::FlarePickup,
            codes::FLARE_DROPPED => Tile::FlareDropped,
            codes::CEREAL_PICKUP => Tile::CerealPickup,
            codes::CEREAL_DROPPED => Tile::CerealDropped,
            codes::LIFE_PICKUP => Tile::LifePickup,
            codes::SPIKES => Tile::Spikes,
            codes::EXIT => Tile::Exit,
            codes::PLAYER_SPAWN => Tile::Spawn(SpawnMarker::Player),
            codes::PET_SPAWN => Tile::Spawn(SpawnMarker::Pet),
            codes::ENEMY_SPAWN => Tile::Spawn(SpawnMarker::Enemy),
            c if c >= codes::OBSTACLE_MIN => Tile::Obstacle(c),
            c => Tile::Inert(c),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Tile::Empty => codes::EMPTY,
            Tile::FlarePickup => codes::FLARE_PICKUP,
            Tile::FlareDropped => codes::FLARE_DROPPED,
            Tile::CerealPickup => codes::CEREAL_PICKUP,
            Tile::CerealDropped => codes::CEREAL_DROPPED,
            Tile::LifePickup => codes::LIFE_PICKUP,
            Tile::Spikes => codes::SPIKES,
            Tile::Exit => codes::EXIT,
            Tile::Spawn(marker) => marker.code(),
            Tile::Obstacle(c) | Tile::Inert(c) => c,
        }
    }

    /// Spawn markers sit in the blocked range; they are erased before play starts.
    pub fn is_passable(self) -> bool {
        self.code() < codes::OBSTACLE_MIN
    }
}
