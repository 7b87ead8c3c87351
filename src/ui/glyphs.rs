/// Cell-to-character mapping for the map view.
///
/// Plain cells map straight through the glyph table. Walkway cells
/// are special: their glyph is derived from which orthogonal
/// neighbors are also walkway, so corridors render as connected
/// box-drawing runs instead of a repeated single character.

use crate::domain::cell::CellState;
use crate::domain::grid::{Grid, Pos};

pub const BORDER_TOP_LEFT: char = '┌';
pub const BORDER_TOP_RIGHT: char = '┐';
pub const BORDER_BOTTOM_LEFT: char = '└';
pub const BORDER_BOTTOM_RIGHT: char = '┘';
pub const BORDER_HORIZONTAL: char = '─';
pub const BORDER_VERTICAL: char = '│';

pub const EDITOR_CURSOR: char = '▓';

/// The drawable character for each cell kind. Loaded from config so
/// players on fonts without these glyphs can swap them out.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    pub player: char,
    pub friend: char,
    pub enemy: char,
    pub exit: char,
    pub breadcrumb: char,
    pub obstacle: char,
    pub open: char,
}

impl Default for GlyphSet {
    fn default() -> Self {
        GlyphSet {
            player: '⚔',
            friend: '☺',
            enemy: '☠',
            exit: '·',
            breadcrumb: '•',
            obstacle: '█',
            open: ' ',
        }
    }
}

impl GlyphSet {
    /// Resolve the character for one cell. `show_breadcrumbs` hides
    /// crumbs without erasing them from the grid.
    pub fn for_cell(&self, grid: &Grid, pos: Pos, show_breadcrumbs: bool) -> char {
        match grid.at(pos) {
            CellState::Player => self.player,
            CellState::Friend => self.friend,
            CellState::Enemy => self.enemy,
            CellState::Exit => self.exit,
            CellState::Obstacle => self.obstacle,
            CellState::Undefined => self.open,
            CellState::Breadcrumb => {
                if show_breadcrumbs {
                    self.breadcrumb
                } else {
                    self.open
                }
            }
            CellState::Path | CellState::SlowPath | CellState::FastPath => {
                junction_glyph(grid, pos).unwrap_or(self.open)
            }
        }
    }
}

/// Pick the box-drawing character matching the walkway neighbors of
/// `pos`. `None` when no neighbor is walkway, so an isolated walkway
/// cell renders as open floor.
pub fn junction_glyph(grid: &Grid, pos: Pos) -> Option<char> {
    let row = pos.row as isize;
    let col = pos.col as isize;
    let up = grid.at_signed(row - 1, col).is_path();
    let down = grid.at_signed(row + 1, col).is_path();
    let left = grid.at_signed(row, col - 1).is_path();
    let right = grid.at_signed(row, col + 1).is_path();

    match (up, down, left, right) {
        (true, true, true, true) => Some('╬'),
        (true, true, true, false) => Some('╣'),
        (true, true, false, true) => Some('╠'),
        (true, false, true, true) => Some('╩'),
        (false, true, true, true) => Some('╦'),
        (true, true, false, false) => Some('║'),
        (false, false, true, true) => Some('═'),
        (true, false, true, false) => Some('╝'),
        (true, false, false, true) => Some('╚'),
        (false, true, true, false) => Some('╗'),
        (false, true, false, true) => Some('╔'),
        (true, false, false, false) => Some('║'),
        (false, true, false, false) => Some('║'),
        (false, false, true, false) => Some('═'),
        (false, false, false, true) => Some('═'),
        (false, false, false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => CellState::Obstacle,
                        '=' => CellState::Path,
                        _ => CellState::Undefined,
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(cells)
    }

    #[test]
    fn corridor_interiors_run_horizontal() {
        let grid = grid_from(&["==="]);
        assert_eq!(junction_glyph(&grid, Pos::new(0, 1)), Some('═'));
    }

    #[test]
    fn corridor_endpoints_extend_toward_their_neighbor() {
        let grid = grid_from(&["==="]);
        assert_eq!(junction_glyph(&grid, Pos::new(0, 0)), Some('═'));
        assert_eq!(junction_glyph(&grid, Pos::new(0, 2)), Some('═'));
    }

    #[test]
    fn corners_and_crossings_pick_junction_shapes() {
        let grid = grid_from(&[
            ".=.",
            "===",
            ".=.",
        ]);
        assert_eq!(junction_glyph(&grid, Pos::new(1, 1)), Some('╬'));
        let grid = grid_from(&[
            "=.",
            "==",
        ]);
        assert_eq!(junction_glyph(&grid, Pos::new(1, 0)), Some('╚'));
    }

    #[test]
    fn isolated_walkway_has_no_glyph() {
        let grid = grid_from(&[".=."]);
        assert_eq!(junction_glyph(&grid, Pos::new(0, 1)), None);
    }

    #[test]
    fn hidden_crumbs_render_as_floor() {
        let mut grid = Grid::new(3, 3);
        grid.set(Pos::new(1, 1), CellState::Breadcrumb);
        let glyphs = GlyphSet::default();
        assert_eq!(glyphs.for_cell(&grid, Pos::new(1, 1), true), '•');
        assert_eq!(glyphs.for_cell(&grid, Pos::new(1, 1), false), ' ');
    }
}
