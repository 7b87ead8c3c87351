/// In-place level editor: a cursor over the session grid plus cell
/// stamping. The heavy lifting (rescanning the player and exits after
/// edits) stays in the session, the editor only mutates cells.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::cell::CellState;
use crate::domain::grid::{Dir, Grid, Pos};

pub struct Editor {
    pub cursor: Pos,
}

impl Editor {
    pub fn new(cursor: Pos) -> Self {
        Editor { cursor }
    }

    /// Step the cursor; the grid edge clamps it. Returns whether it
    /// moved.
    pub fn move_cursor(&mut self, dir: Dir, grid: &Grid) -> bool {
        match grid.neighbor(self.cursor, dir) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    /// Write one cell under the cursor. Stamping a player removes the
    /// previous one first so the map never holds two.
    pub fn stamp(&self, grid: &mut Grid, state: CellState) {
        if state == CellState::Player {
            if let Some(old) = grid.find(CellState::Player) {
                grid.set(old, CellState::Undefined);
            }
        }
        grid.set(self.cursor, state);
    }
}

/// Fallback name for the save prompt, unique enough per session.
pub fn default_filename() -> String {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("map-{stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_grid_edge_clamps_the_cursor() {
        let grid = Grid::new(3, 3);
        let mut editor = Editor::new(Pos::new(0, 0));
        assert!(!editor.move_cursor(Dir::Up, &grid));
        assert!(!editor.move_cursor(Dir::Left, &grid));
        assert_eq!(editor.cursor, Pos::new(0, 0));
        assert!(editor.move_cursor(Dir::Down, &grid));
        assert_eq!(editor.cursor, Pos::new(1, 0));
    }

    #[test]
    fn stamping_a_player_relocates_it() {
        let mut grid = Grid::new(3, 3);
        Editor::new(Pos::new(0, 0)).stamp(&mut grid, CellState::Player);
        Editor::new(Pos::new(2, 2)).stamp(&mut grid, CellState::Player);
        assert_eq!(grid.at(Pos::new(0, 0)), CellState::Undefined);
        assert_eq!(grid.at(Pos::new(2, 2)), CellState::Player);
        assert_eq!(grid.positions_of(CellState::Player).len(), 1);
    }

    #[test]
    fn other_stamps_overwrite_in_place() {
        let mut grid = Grid::new(3, 3);
        let editor = Editor::new(Pos::new(1, 1));
        editor.stamp(&mut grid, CellState::Exit);
        editor.stamp(&mut grid, CellState::Undefined);
        assert_eq!(grid.at(Pos::new(1, 1)), CellState::Undefined);
    }

    #[test]
    fn default_filenames_carry_the_map_prefix() {
        assert!(default_filename().starts_with("map-"));
    }
}
