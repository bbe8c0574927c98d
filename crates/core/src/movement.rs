//! Sub-tile movement and collision resolution.
//! This module exists so every agent moves by the same micro-step rules.
//! It does not own direction choice; callers resolve that first.

use crate::state::{Agent, TileGrid};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The attempt was rolled back or produced no displacement.
    Blocked,
}

/// Advances one micro-step along `direction`'s axis.
///
/// Positive moves grow the offset and snap into the next cell once it reaches
/// `steps_per_tile`. Negative moves first shrink a pending offset back to the
/// owning cell; from an aligned position they enter the far side of the lower cell.
pub fn advance_along_axis(agent: &mut Agent, direction: Direction, steps_per_tile: i32) {
    let axis = direction.axis();
    let offset = agent.offset.on(axis);
    if direction.sign() > 0 {
        let next = offset + agent.speed;
        if next >= steps_per_tile {
            shift_index(agent, axis, 1);
            agent.offset.set(axis, 0);
        } else {
            agent.offset.set(axis, next);
        }
    } else if offset > 0 {
        agent.offset.set(axis, (offset - agent.speed).max(0));
    } else {
        shift_index(agent, axis, -1);
        agent.offset.set(axis, (steps_per_tile - agent.speed).max(0));
    }
}

/// Clamps the index on `axis` into the grid. At either edge the offset on that
/// axis is zeroed so the agent can never straddle past the last cell.
pub fn constrain_to_bounds(agent: &mut Agent, axis: Axis, grid: &TileGrid) {
    let (index, count) = match axis {
        Axis::Horizontal => (agent.pos.x, grid.width() as i32),
        Axis::Vertical => (agent.pos.y, grid.height() as i32),
    };
    let last = (count - 1).max(0);
    if index <= 0 {
        set_index(agent, axis, 0);
        if index < 0 {
            agent.offset.set(axis, 0);
        }
    } else if index >= last {
        set_index(agent, axis, last);
        agent.offset.set(axis, 0);
    }
}

/// Whether every cell on the leading edge of the agent, seen in `direction`,
/// is passable. Straddling agents check both cells on the orthogonal axis.
pub fn check_passable(agent: &Agent, direction: Direction, grid: &TileGrid) -> bool {
    let axis = direction.axis();
    let along = match axis {
        Axis::Horizontal => agent.pos.x,
        Axis::Vertical => agent.pos.y,
    };
    let lead = if direction.sign() > 0 && agent.offset.on(axis) > 0 { along + 1 } else { along };
    let across = match axis {
        Axis::Horizontal => agent.pos.y,
        Axis::Vertical => agent.pos.x,
    };
    let straddling = agent.offset.on(axis.other()) > 0;
    let cells = if straddling { vec![across, across + 1] } else { vec![across] };
    cells.into_iter().all(|other| {
        let pos = match axis {
            Axis::Horizontal => Pos { y: other, x: lead },
            Axis::Vertical => Pos { y: lead, x: other },
        };
        grid.is_passable(pos)
    })
}

/// One full movement attempt: advance, clamp, verify, and roll back on failure.
pub fn try_move(
    agent: &mut Agent,
    direction: Direction,
    grid: &TileGrid,
    steps_per_tile: i32,
) -> MoveOutcome {
    let axis = direction.axis();
    let before_pos = agent.pos;
    let before_offset = agent.offset;
    agent.heading = Some(direction);

    advance_along_axis(agent, direction, steps_per_tile);
    constrain_to_bounds(agent, axis, grid);

    if !check_passable(agent, direction, grid) {
        agent.pos = before_pos;
        agent.offset.set(axis, 0);
        return MoveOutcome::Blocked;
    }
    if agent.pos == before_pos && agent.offset == before_offset {
        return MoveOutcome::Blocked;
    }
    MoveOutcome::Moved
}

/// Runs [`try_move`] on a scratch copy so the caller can test a heading.
pub fn probe(agent: &Agent, direction: Direction, grid: &TileGrid, steps_per_tile: i32) -> bool {
    let mut scratch = agent.clone();
    try_move(&mut scratch, direction, grid, steps_per_tile) == MoveOutcome::Moved
}

/// Heading that slides a straddling agent back onto its owning cell on `axis`.
pub fn realign_direction(agent: &Agent, axis: Axis) -> Option<Direction> {
    if agent.offset.on(axis) == 0 {
        return None;
    }
    Some(match axis {
        Axis::Horizontal => Direction::Left,
        Axis::Vertical => Direction::Up,
    })
}

fn shift_index(agent: &mut Agent, axis: Axis, delta: i32) {
    match axis {
        Axis::Horizontal => agent.pos.x += delta,
        Axis::Vertical => agent.pos.y += delta,
    }
}

fn set_index(agent: &mut Agent, axis: Axis, value: i32) {
    match axis {
        Axis::Horizontal => agent.pos.x = value,
        Axis::Vertical => agent.pos.y = value,
    }
}
