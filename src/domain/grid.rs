/// Grid: the single owner of positional truth for one maze.
///
/// Axis convention everywhere: `row` grows downward, `col` grows right.
/// Writes outside the bounds are silent no-ops and reads outside the
/// bounds report `Obstacle`, so callers can probe neighbors freely.

use crate::domain::cell::CellState;

/// A cell coordinate. Hashable by value so it can key visited sets
/// and parent maps during pathfinding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

/// The four orthogonal directions, in the scan order used by both
/// pathfinding and neighbor probes. Keep this order fixed: BFS tie
/// breaking depends on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// A fresh grid starts fully walled. Carving opens it up.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![CellState::Obstacle; width * height],
        }
    }

    /// Build a grid from prepared rows. Rows must be rectangular;
    /// the parser and test fixtures guarantee that.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            debug_assert_eq!(row.len(), width);
            cells.extend(row);
        }
        Grid { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// State at `pos`. Out of bounds reads as a wall.
    #[inline]
    pub fn at(&self, pos: Pos) -> CellState {
        if self.in_bounds(pos) {
            self.cells[pos.row * self.width + pos.col]
        } else {
            CellState::Obstacle
        }
    }

    /// Signed-coordinate probe for neighbor checks that may step
    /// past the edge. Out of bounds reads as a wall.
    #[inline]
    pub fn at_signed(&self, row: isize, col: isize) -> CellState {
        if row < 0 || col < 0 {
            CellState::Obstacle
        } else {
            self.at(Pos::new(row as usize, col as usize))
        }
    }

    /// Write `state` at `pos`. Out of bounds is a silent no-op.
    #[inline]
    pub fn set(&mut self, pos: Pos, state: CellState) {
        if self.in_bounds(pos) {
            self.cells[pos.row * self.width + pos.col] = state;
        }
    }

    /// The in-bounds neighbor of `pos` in direction `dir`, if any.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Pos::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// First cell holding `state`, scanning row-major.
    pub fn find(&self, state: CellState) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&c| c == state)
            .map(|i| Pos::new(i / self.width, i % self.width))
    }

    /// Every cell holding `state`, in row-major order.
    pub fn positions_of(&self, state: CellState) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == state)
            .map(|(i, _)| Pos::new(i / self.width, i % self.width))
            .collect()
    }

    /// Replace every cell holding `from` with `to`.
    pub fn replace_all(&mut self, from: CellState, to: CellState) {
        for cell in &mut self.cells {
            if *cell == from {
                *cell = to;
            }
        }
    }
}
