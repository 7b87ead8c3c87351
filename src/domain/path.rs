/// Breadth-first pathfinding and breadcrumb hints.
///
/// The grid graph is 4-connected; an edge exists between adjacent
/// cells iff neither is a wall. Neighbors are always scanned in the
/// `Dir::ALL` order, so ties between equal-length routes resolve the
/// same way on every run with the same grid.

use std::collections::{HashMap, VecDeque};

use crate::domain::cell::CellState;
use crate::domain::grid::{Dir, Grid, Pos};

/// Shortest route from `start` to `goal`, start exclusive, goal
/// inclusive. Empty when the goal is unreachable or equal to `start`.
pub fn shortest_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
    bfs(grid, start, |pos| pos == goal)
}

/// Shortest route from `start` to whichever of `exits` is closest.
/// A single search that stops at the first exit dequeued.
pub fn shortest_path_to_any(grid: &Grid, start: Pos, exits: &[Pos]) -> Vec<Pos> {
    if exits.is_empty() {
        return vec![];
    }
    bfs(grid, start, |pos| exits.contains(&pos))
}

fn bfs(grid: &Grid, start: Pos, is_goal: impl Fn(Pos) -> bool) -> Vec<Pos> {
    if !grid.at(start).is_walkable() || is_goal(start) {
        return vec![];
    }
    let mut parents: HashMap<Pos, Pos> = HashMap::new();
    let mut queue = VecDeque::new();
    parents.insert(start, start);
    queue.push_back(start);

    let mut found = None;
    while let Some(current) = queue.pop_front() {
        if is_goal(current) {
            found = Some(current);
            break;
        }
        for dir in Dir::ALL {
            let Some(next) = grid.neighbor(current, dir) else {
                continue;
            };
            if grid.at(next).is_walkable() && !parents.contains_key(&next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    let Some(goal) = found else {
        return vec![];
    };
    let mut path = vec![];
    let mut cursor = goal;
    while cursor != start {
        path.push(cursor);
        cursor = parents[&cursor];
    }
    path.reverse();
    path
}

/// Stamp breadcrumbs along a computed route. Only plain open cells
/// take the marker; entities, exits, and existing crumbs are left
/// alone, which makes repeated painting idempotent.
pub fn paint_breadcrumbs(grid: &mut Grid, path: &[Pos]) {
    for &pos in path {
        if grid.at(pos) == CellState::Undefined {
            grid.set(pos, CellState::Breadcrumb);
        }
    }
}

/// Erase every breadcrumb, restoring the open floor underneath.
pub fn clear_breadcrumbs(grid: &mut Grid) {
    grid.replace_all(CellState::Breadcrumb, CellState::Undefined);
}

/// Paint the route to the nearest exit only.
pub fn mark_route_to_nearest(grid: &mut Grid, start: Pos, exits: &[Pos]) {
    let route = shortest_path_to_any(grid, start, exits);
    paint_breadcrumbs(grid, &route);
}

/// Paint the union of the routes to every exit.
pub fn mark_routes_to_all(grid: &mut Grid, start: Pos, exits: &[Pos]) {
    for &exit in exits {
        let route = shortest_path(grid, start, exit);
        paint_breadcrumbs(grid, &route);
    }
}
