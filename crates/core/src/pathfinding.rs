//! Deterministic A* over the tile grid.
//! This module exists so route search is reusable by every pathing agent.
//! It does not own target selection or how a route is walked.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::TileGrid;
use crate::types::*;

/// Scale applied to step and heuristic costs so Euclidean estimates stay integral.
pub const COST_SCALE: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    seq: u32,
    y: i32,
    x: i32,
}

/// Searches for a route from `start` to `goal`, giving up after `max_iterations`
/// frontier pops. The returned route excludes `start` and ends at `goal`; an
/// empty route means no path was found within budget (or `start == goal`).
pub fn find_path(
    grid: &TileGrid,
    start: Pos,
    goal: Pos,
    heuristic: Heuristic,
    max_iterations: u32,
) -> Route {
    if start == goal || !grid.in_bounds(start) || !grid.is_passable(goal) {
        return Route::empty();
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let mut closed = BTreeSet::new();
    let mut seq = 0;

    let h = estimate(heuristic, start, goal);
    open_set.insert(OpenNode { f: h, h, seq, y: start.y, x: start.x });
    g_score.insert(start, 0u32);

    let mut iterations = 0;
    while iterations < max_iterations {
        let Some(curr) = open_set.pop_first() else {
            log::debug!("no route from {start:?} to {goal:?}: frontier empty");
            return Route::empty();
        };
        iterations += 1;

        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        if !closed.insert(p) {
            continue;
        }
        let cur_g = g_score.get(&p).copied().unwrap_or(u32::MAX);
        for n in neighbors(p) {
            if !grid.is_passable(n) || closed.contains(&n) {
                continue;
            }
            let tg = cur_g.saturating_add(COST_SCALE);
            if tg < g_score.get(&n).copied().unwrap_or(u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = estimate(heuristic, n, goal);
                seq += 1;
                open_set.insert(OpenNode { f: tg + h, h, seq, y: n.y, x: n.x });
            }
        }
    }

    log::debug!("no route from {start:?} to {goal:?}: budget of {max_iterations} used up");
    Route::empty()
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Route {
    let mut p = goal;
    let mut result = vec![p];
    while let Some(prev) = came.get(&p).copied() {
        if prev == start {
            break;
        }
        p = prev;
        result.push(p);
    }
    result.reverse();
    Route::new(result)
}

/// North, south, east, west. Insertion order is part of the tie-break.
pub fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

fn estimate(heuristic: Heuristic, from: Pos, to: Pos) -> u32 {
    match heuristic {
        Heuristic::Manhattan => manhattan(from, to) * COST_SCALE,
        Heuristic::Euclidean => {
            let dx = f64::from(from.x - to.x);
            let dy = f64::from(from.y - to.y);
            ((dx * dx + dy * dy).sqrt() * f64::from(COST_SCALE)) as u32
        }
    }
}

/// First step direction of `route` from `from`, plus the last cell of the
/// leading run that keeps that direction.
pub fn straight_run(from: Pos, route: &Route) -> Option<(Direction, Pos)> {
    let first = route.first()?;
    let direction = Direction::between(from, first)?;
    let mut destination = first;
    for next in route.cells().iter().skip(1).copied() {
        if direction.step(destination) != next {
            break;
        }
        destination = next;
    }
    Some((direction, destination))
}
