/// Live game state: the grid, the player, and phase bookkeeping.
///
/// The session owns the authoritative copy of the map. Replacing the
/// map (new maze, editor handoff, load from disk) always goes through
/// `adopt_grid` or `rescan`, which rederive the player position and
/// the exit list from cell contents so the two can never drift apart
/// from what the grid actually holds.

use rand::rngs::StdRng;

use crate::domain::carve;
use crate::domain::cell::CellState;
use crate::domain::grid::{Dir, Grid, Pos};
use crate::domain::path;
use crate::domain::populate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    Editor,
    Won,
}

pub struct Session {
    pub grid: Grid,
    pub phase: Phase,
    pub player: Pos,
    pub exits: Vec<Pos>,
    pub show_hints: bool,
    pub all_exit_hints: bool,
    pub message: String,
}

impl Session {
    pub fn new() -> Self {
        Session {
            grid: Grid::new(0, 0),
            phase: Phase::Title,
            player: Pos::new(0, 0),
            exits: Vec::new(),
            show_hints: false,
            all_exit_hints: false,
            message: String::new(),
        }
    }

    /// Generate a fresh maze and drop the player into it.
    pub fn new_maze(&mut self, width: usize, height: usize, rng: &mut StdRng) {
        let mut grid = Grid::new(width, height);
        carve::generate(&mut grid, rng);
        let placement = populate::populate(&mut grid, rng);
        self.grid = grid;
        self.player = placement.player;
        self.exits = placement.exits;
        self.message.clear();
        self.refresh_hints();
        self.phase = Phase::Playing;
    }

    /// Take over a grid that came from disk or the editor.
    pub fn adopt_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.rescan();
        self.phase = Phase::Playing;
    }

    /// Rederive player and exits from cell contents. A grid without a
    /// player gets one stamped onto the first open cell.
    pub fn rescan(&mut self) {
        self.player = match self.grid.find(CellState::Player) {
            Some(pos) => pos,
            None => {
                let pos = self
                    .grid
                    .find(CellState::Undefined)
                    .unwrap_or(Pos::new(0, 0));
                self.grid.set(pos, CellState::Player);
                pos
            }
        };
        self.exits = self.grid.positions_of(CellState::Exit);
        self.refresh_hints();
    }

    /// Step the player one cell. Walls and the map edge block the
    /// move; anything else is walked over and consumed. Returns
    /// whether the player actually moved.
    pub fn move_player(&mut self, dir: Dir) -> bool {
        let Some(next) = self.grid.neighbor(self.player, dir) else {
            return false;
        };
        if !self.grid.at(next).is_walkable() {
            return false;
        }

        self.grid.set(self.player, CellState::Undefined);
        self.grid.set(next, CellState::Player);
        self.player = next;
        self.refresh_hints();

        // Exit positions survive in the list even though the player
        // now occupies the cell.
        if self.exits.contains(&self.player) {
            self.phase = Phase::Won;
            self.set_message("You found the way out!");
        }
        true
    }

    pub fn toggle_hints(&mut self) {
        self.show_hints = !self.show_hints;
        self.refresh_hints();
    }

    /// Repaint the breadcrumb layer for the current player position.
    /// While hints are off the layer is left untouched, so crumbs
    /// stamped by hand in the editor survive.
    pub fn refresh_hints(&mut self) {
        if !self.show_hints {
            return;
        }
        path::clear_breadcrumbs(&mut self.grid);
        if self.all_exit_hints {
            path::mark_routes_to_all(&mut self.grid, self.player, &self.exits);
        } else {
            path::mark_route_to_nearest(&mut self.grid, self.player, &self.exits);
        }
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = text.into();
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
                        'P' => CellState::Player,
                        'E' => CellState::Exit,
                        'F' => CellState::Friend,
                        _ => CellState::Undefined,
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(cells)
    }

    fn session_from(rows: &[&str]) -> Session {
        let mut session = Session::new();
        session.adopt_grid(grid_from(rows));
        session
    }

    #[test]
    fn walls_block_movement() {
        let mut session = session_from(&["###", "#P#", "###"]);
        let before = session.grid.clone();
        assert!(!session.move_player(Dir::Left));
        assert!(!session.move_player(Dir::Up));
        assert_eq!(session.grid, before);
        assert_eq!(session.player, Pos::new(1, 1));
    }

    #[test]
    fn the_map_edge_blocks_movement() {
        let mut session = session_from(&["P."]);
        assert!(!session.move_player(Dir::Up));
        assert!(!session.move_player(Dir::Left));
        assert!(session.move_player(Dir::Right));
    }

    #[test]
    fn moving_restores_open_floor_behind() {
        let mut session = session_from(&["#P.#"]);
        assert!(session.move_player(Dir::Right));
        assert_eq!(session.grid.at(Pos::new(0, 1)), CellState::Undefined);
        assert_eq!(session.grid.at(Pos::new(0, 2)), CellState::Player);
        assert_eq!(session.player, Pos::new(0, 2));
    }

    #[test]
    fn walking_over_a_friend_consumes_it() {
        let mut session = session_from(&["#PF.#"]);
        session.move_player(Dir::Right);
        session.move_player(Dir::Right);
        assert_eq!(session.grid.at(Pos::new(0, 2)), CellState::Undefined);
        assert!(session.grid.find(CellState::Friend).is_none());
    }

    #[test]
    fn stepping_onto_an_exit_wins() {
        let mut session = session_from(&["#PE#"]);
        assert!(session.move_player(Dir::Right));
        assert_eq!(session.phase, Phase::Won);
        assert_eq!(session.grid.at(Pos::new(0, 2)), CellState::Player);
        assert!(!session.message.is_empty());
    }

    #[test]
    fn adopted_grids_are_rescanned() {
        let mut session = Session::new();
        session.adopt_grid(grid_from(&["E..", ".P.", "..E"]));
        assert_eq!(session.player, Pos::new(1, 1));
        assert_eq!(session.exits, vec![Pos::new(0, 0), Pos::new(2, 2)]);
        assert_eq!(session.phase, Phase::Playing);
    }

    #[test]
    fn a_grid_without_a_player_gets_one() {
        let mut session = Session::new();
        session.adopt_grid(grid_from(&["#.#"]));
        assert_eq!(session.player, Pos::new(0, 1));
        assert_eq!(session.grid.at(Pos::new(0, 1)), CellState::Player);
    }

    #[test]
    fn toggling_hints_on_paints_a_route() {
        let mut session = session_from(&["#P.E#"]);
        session.toggle_hints();
        assert!(session.show_hints);
        assert_eq!(session.grid.at(Pos::new(0, 2)), CellState::Breadcrumb);

        session.toggle_hints();
        // Turning hints off leaves the crumb layer in place; the
        // renderer hides it.
        assert_eq!(session.grid.at(Pos::new(0, 2)), CellState::Breadcrumb);
    }

    #[test]
    fn hints_follow_the_player() {
        let mut session = session_from(&["#P..E#"]);
        session.toggle_hints();
        session.move_player(Dir::Right);
        assert_eq!(session.grid.at(Pos::new(0, 1)), CellState::Undefined);
        assert_eq!(session.grid.at(Pos::new(0, 3)), CellState::Breadcrumb);
    }
}
