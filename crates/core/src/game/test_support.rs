//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and agent setup across many tests.
//! It does not own production gameplay logic.

use super::*;

pub(super) const ARENA_SIZE: usize = 11;

/// Wall-free 11x11 arena with the pet starting on the player's cell.
pub(super) fn open_arena_game(seed: u64, player: Pos, enemy: Pos) -> Game {
    let mut grid = TileGrid::new(ARENA_SIZE, ARENA_SIZE);
    grid.set_tile(player.y, player.x, codes::PLAYER_SPAWN).expect("player spawn in arena");
    grid.set_tile(enemy.y, enemy.x, codes::ENEMY_SPAWN).expect("enemy spawn in arena");
    Game::new(seed, grid, Tuning::default()).expect("arena has both spawns")
}
