/// Maze carving: randomized depth-first corridor generation.
///
/// How it works:
///   1. Start fully walled, open the cell at (1, 1)
///   2. Peek the stack top, list unvisited cells two steps away
///   3. Pick one at random, open it plus the wall between, push it
///   4. No candidates: pop and backtrack
///   5. Afterwards, open a few extra walls so the maze has loops
///
/// Picking a single neighbor per iteration (instead of pushing every
/// shuffled neighbor at once) keeps the corridors winding, with
/// branches only where the walk actually forked.

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::cell::CellState;
use crate::domain::grid::{Grid, Pos};

/// Chance that an odd interior cell gets one extra wall opened.
const LOOP_CHANCE: f64 = 0.2;

/// Carve a connected maze into `grid`, then punch extra connections.
/// Grids smaller than 3x3 have no interior to carve and are left as is.
pub fn generate(grid: &mut Grid, rng: &mut StdRng) {
    if grid.width() < 3 || grid.height() < 3 {
        return;
    }
    carve_passages(grid, rng);
    connect_rooms(grid, rng);
}

fn carve_passages(grid: &mut Grid, rng: &mut StdRng) {
    let start = Pos::new(1, 1);
    grid.set(start, CellState::Undefined);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let candidates = unvisited_neighbors(grid, current);
        if candidates.is_empty() {
            stack.pop();
            continue;
        }
        let next = candidates[rng.gen_range(0..candidates.len())];
        let wall = Pos::new((current.row + next.row) / 2, (current.col + next.col) / 2);
        grid.set(wall, CellState::Undefined);
        grid.set(next, CellState::Undefined);
        stack.push(next);
    }
}

/// Cells two steps away that are still walled, strictly inside the
/// one-cell border.
fn unvisited_neighbors(grid: &Grid, pos: Pos) -> Vec<Pos> {
    let mut out = Vec::with_capacity(4);
    let (row, col) = (pos.row as isize, pos.col as isize);
    for (dr, dc) in [(-2isize, 0isize), (2, 0), (0, -2), (0, 2)] {
        let (nr, nc) = (row + dr, col + dc);
        if nr < 1 || nc < 1 {
            continue;
        }
        let next = Pos::new(nr as usize, nc as usize);
        if next.row >= grid.height() - 1 || next.col >= grid.width() - 1 {
            continue;
        }
        if grid.at(next) == CellState::Obstacle {
            out.push(next);
        }
    }
    out
}

/// Open extra walls so the maze is not a strict tree. Each odd interior
/// cell opens its right or down wall with probability `LOOP_CHANCE`,
/// giving the player more than one route to an exit.
fn connect_rooms(grid: &mut Grid, rng: &mut StdRng) {
    for row in (1..grid.height() - 1).step_by(2) {
        for col in (1..grid.width() - 1).step_by(2) {
            if !rng.gen_bool(LOOP_CHANCE) {
                continue;
            }
            let wall = if rng.gen_bool(0.5) {
                Pos::new(row, col + 1)
            } else {
                Pos::new(row + 1, col)
            };
            if wall.row < grid.height() - 1 && wall.col < grid.width() - 1 {
                grid.set(wall, CellState::Undefined);
            }
        }
    }
}
