/// Entity and exit placement over a carved maze.
///
/// Runs after carving, before any breadcrumbs exist. Placement is
/// rejection sampling: draw random interior coordinates until one
/// lands on an open cell. Exits are different: each border side gets
/// one attempt, chosen from the edge positions that actually touch
/// an open interior cell.

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::cell::CellState;
use crate::domain::grid::{Dir, Grid, Pos};

/// Fraction of the grid area placed as friends, and again as enemies.
const COMPANION_SHARE: usize = 5;

/// Where the placer put the player and which cells became exits,
/// in side order: top, bottom, left, right.
#[derive(Clone, Debug)]
pub struct Placement {
    pub player: Pos,
    pub exits: Vec<Pos>,
}

pub fn populate(grid: &mut Grid, rng: &mut StdRng) -> Placement {
    let player = place_player(grid, rng);
    place_companions(grid, rng);
    let exits = place_exits(grid, rng);
    Placement { player, exits }
}

/// Exactly one player, on a uniformly random open cell.
fn place_player(grid: &mut Grid, rng: &mut StdRng) -> Pos {
    if let Some(pos) = sample_cell(grid, rng, |c| c == CellState::Undefined) {
        grid.set(pos, CellState::Player);
        return pos;
    }
    // Sampling only fails on degenerate grids with no open interior.
    // Claim the carve start so the caller still gets a live player.
    let pos = grid.find(CellState::Undefined).unwrap_or(Pos::new(1, 1));
    grid.set(pos, CellState::Player);
    pos
}

/// Scatter friends and enemies, 5% of the cell count each. They sit
/// on the map as scenery; walking over one consumes it.
fn place_companions(grid: &mut Grid, rng: &mut StdRng) {
    let count = grid.width() * grid.height() * COMPANION_SHARE / 100;
    for _ in 0..count {
        place_marker(grid, rng, CellState::Friend);
        place_marker(grid, rng, CellState::Enemy);
    }
}

fn place_marker(grid: &mut Grid, rng: &mut StdRng, state: CellState) {
    if let Some(pos) = sample_cell(grid, rng, |c| c.accepts_entity()) {
        grid.set(pos, state);
    }
}

/// Draw random interior coordinates until `accept` matches. The open
/// fraction after carving is large, so the bound exists only to keep
/// the function total on degenerate input.
fn sample_cell(
    grid: &Grid,
    rng: &mut StdRng,
    accept: impl Fn(CellState) -> bool,
) -> Option<Pos> {
    if grid.width() < 3 || grid.height() < 3 {
        return None;
    }
    let attempts = grid.width() * grid.height() * 10;
    for _ in 0..attempts {
        let pos = Pos::new(
            rng.gen_range(1..grid.height() - 1),
            rng.gen_range(1..grid.width() - 1),
        );
        if accept(grid.at(pos)) {
            return Some(pos);
        }
    }
    None
}

/// One exit attempt per side, in fixed order: top, bottom, left,
/// right. A side is skipped when no edge position touches an open
/// interior cell, so fewer than four exits is a normal outcome.
fn place_exits(grid: &mut Grid, rng: &mut StdRng) -> Vec<Pos> {
    let mut exits = Vec::with_capacity(4);
    for side in 0..4 {
        if let Some(pos) = pick_exit_position(grid, side, rng) {
            grid.set(pos, CellState::Exit);
            ensure_exit_open(grid, pos);
            exits.push(pos);
        }
    }
    exits
}

/// Candidate edge positions for a side (0 top, 1 bottom, 2 left,
/// 3 right), restricted to those with an adjacent open cell. Corners
/// are excluded.
fn pick_exit_position(grid: &Grid, side: usize, rng: &mut StdRng) -> Option<Pos> {
    let (h, w) = (grid.height(), grid.width());
    if h < 3 || w < 3 {
        return None;
    }
    let candidates: Vec<Pos> = match side {
        0 => (1..w - 1).map(|c| Pos::new(0, c)).collect(),
        1 => (1..w - 1).map(|c| Pos::new(h - 1, c)).collect(),
        2 => (1..h - 1).map(|r| Pos::new(r, 0)).collect(),
        _ => (1..h - 1).map(|r| Pos::new(r, w - 1)).collect(),
    };
    let valid: Vec<Pos> = candidates
        .into_iter()
        .filter(|&p| touches_open_cell(grid, p))
        .collect();
    if valid.is_empty() {
        None
    } else {
        Some(valid[rng.gen_range(0..valid.len())])
    }
}

fn touches_open_cell(grid: &Grid, pos: Pos) -> bool {
    Dir::ALL
        .iter()
        .any(|&d| grid.neighbor(pos, d).map_or(false, |n| grid.at(n) == CellState::Undefined))
}

/// If every orthogonal neighbor of a fresh exit is still walled, open
/// the first in-bounds one so the exit can be reached from inside.
fn ensure_exit_open(grid: &mut Grid, exit: Pos) {
    let reachable = Dir::ALL
        .iter()
        .any(|&d| grid.neighbor(exit, d).map_or(false, |n| grid.at(n).is_walkable()));
    if reachable {
        return;
    }
    for dir in Dir::ALL {
        if let Some(n) = grid.neighbor(exit, dir) {
            grid.set(n, CellState::Undefined);
            return;
        }
    }
}
