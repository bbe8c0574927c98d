//! Shared loading for the command-line tools.
//! This module exists so `replay` and `fuzz` read levels and tuning the same way.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chase_core::{BehaviorState, DEFAULT_LEVEL, Game, ItemKey, TileGrid, Tuning};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Reads a CSV level, or the built-in one when no path is given.
pub fn load_level(path: Option<&Path>) -> Result<TileGrid> {
    let Some(path) = path else {
        return TileGrid::from_csv(DEFAULT_LEVEL).context("built-in level is invalid");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read map file: {}", path.display()))?;
    TileGrid::from_csv(&text).with_context(|| format!("failed to parse map: {}", path.display()))
}

/// Reads a TOML tuning file, or the defaults when no path is given.
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file: {}", path.display()))?;
    Tuning::from_toml_str(&text)
        .with_context(|| format!("failed to load tuning: {}", path.display()))
}

/// Checks the state rules every tick must preserve.
pub fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let tuning = game.tuning();
    let steps = tuning.steps_per_tile;
    for agent in state.agents.values() {
        if !state.grid.is_passable(agent.pos) {
            bail!("{:?} at {:?} is off the grid or inside an obstacle", agent.kind, agent.pos);
        }
        if !(0..steps).contains(&agent.offset.x) || !(0..steps).contains(&agent.offset.y) {
            bail!("{:?} has offset {:?} outside 0..{steps}", agent.kind, agent.offset);
        }
    }

    let limit = match state.brain.state {
        BehaviorState::Idle => Some(tuning.idle_limit),
        BehaviorState::Patrol => Some(tuning.patrol_limit),
        BehaviorState::Stunned => Some(tuning.stunned_limit),
        BehaviorState::FlareFollow => Some(tuning.flare_limit),
        BehaviorState::Chase | BehaviorState::Hunting => None,
    };
    if let Some(limit) = limit
        && state.brain.counter > limit + 1
    {
        let state_name = state.brain.state;
        bail!("{state_name:?} counter {} passed its limit {limit}", state.brain.counter);
    }

    for key in [ItemKey::Lives, ItemKey::Item, ItemKey::Whistle] {
        let count = state.inventory.count(key);
        if !(0..=state.inventory.max(key)).contains(&count) {
            bail!("{key:?} count {count} outside 0..={}", state.inventory.max(key));
        }
    }
    Ok(())
}
