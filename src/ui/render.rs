/// Frame composition: turns game state into screen content.
///
/// Each phase has its own compose routine. All of them draw into the
/// `Screen` buffer; the diff against the previous frame happens in
/// `Screen::flush`, so composing the full frame every time is cheap.

use std::io::{self, BufWriter};

use crossterm::{
    cursor, execute, terminal,
    terminal::{Clear, ClearType},
};

use crate::domain::grid::{Grid, Pos};
use crate::sim::editor::Editor;
use crate::sim::session::{Phase, Session};
use crate::ui::glyphs::{
    GlyphSet, BORDER_BOTTOM_LEFT, BORDER_BOTTOM_RIGHT, BORDER_HORIZONTAL, BORDER_TOP_LEFT,
    BORDER_TOP_RIGHT, BORDER_VERTICAL, EDITOR_CURSOR,
};
use crate::ui::screen::Screen;

/// Row where the framed map starts; row 0 is the key bar.
const MAP_ROW: u16 = 2;

/// Render the framed map as one string per terminal row.
pub fn render_rows(grid: &Grid, glyphs: &GlyphSet, show_breadcrumbs: bool) -> Vec<String> {
    let inner = grid.width();
    let mut rows = Vec::with_capacity(grid.height() + 2);

    let mut top = String::with_capacity(inner + 2);
    top.push(BORDER_TOP_LEFT);
    for _ in 0..inner {
        top.push(BORDER_HORIZONTAL);
    }
    top.push(BORDER_TOP_RIGHT);
    rows.push(top);

    for row in 0..grid.height() {
        let mut line = String::with_capacity(inner + 2);
        line.push(BORDER_VERTICAL);
        for col in 0..inner {
            line.push(glyphs.for_cell(grid, Pos::new(row, col), show_breadcrumbs));
        }
        line.push(BORDER_VERTICAL);
        rows.push(line);
    }

    let mut bottom = String::with_capacity(inner + 2);
    bottom.push(BORDER_BOTTOM_LEFT);
    for _ in 0..inner {
        bottom.push(BORDER_HORIZONTAL);
    }
    bottom.push(BORDER_BOTTOM_RIGHT);
    rows.push(bottom);

    rows
}

pub struct Renderer {
    screen: Screen<BufWriter<io::Stdout>>,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            screen: Screen::new(BufWriter::with_capacity(16384, io::stdout()), 0, 0),
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.screen.writer_mut(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.screen.resize(tw, th)?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.screen.writer_mut(),
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn draw(&mut self, session: &Session, editor: &Editor, glyphs: &GlyphSet) -> io::Result<()> {
        // Follow terminal size; resizing invalidates the buffers.
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.screen.resize(tw, th)?;

        if self.last_phase != Some(session.phase) {
            self.screen.invalidate();
            self.last_phase = Some(session.phase);
        }

        self.screen.clear();
        match session.phase {
            Phase::Title => self.compose_title(session),
            Phase::Playing => self.compose_game(session, glyphs),
            Phase::Editor => self.compose_editor(session, editor, glyphs),
            Phase::Won => self.compose_won(session),
        }
        self.screen.flush()?;
        Ok(())
    }

    fn hints_label(session: &Session) -> &'static str {
        match (session.show_hints, session.all_exit_hints) {
            (false, _) => "off",
            (true, false) => "nearest exit",
            (true, true) => "all exits",
        }
    }

    fn compose_title(&mut self, session: &Session) {
        let banner = [
            r"__      __              __  _           _",
            r"\ \    / / __ _  _  _  / _|(_) _ _   __| | ___  _ _",
            r" \ \/\/ / / _` || || ||  _|| || ' \ / _` |/ -_)| '_|",
            r"  \_/\_/  \__,_| \_, ||_|  |_||_||_|\__,_|\___||_|",
            r"                 |__/",
        ];
        for (i, line) in banner.iter().enumerate() {
            self.screen.write_text(2, 1 + i as u16, line);
        }

        self.screen.write_text(4, 8, "Find your way out of the maze.");

        let menu_base: u16 = 11;
        self.screen.write_text(6, menu_base, "G      New maze");
        self.screen.write_text(6, menu_base + 1, "E      Level editor");
        self.screen.write_text(6, menu_base + 2, "L      Load a saved map");
        let hints = format!("B      Exit hints: {}", Self::hints_label(session));
        self.screen.write_text(6, menu_base + 3, &hints);
        self.screen.write_text(6, menu_base + 4, "Q      Quit");

        let help = [
            "In the maze",
            "  arrows / WASD / HJKL   move",
            "  B toggle hints   E edit   N new maze",
            "  Q / ESC back to this menu",
        ];
        for (i, line) in help.iter().enumerate() {
            self.screen.write_text(6, menu_base + 7 + i as u16, line);
        }

        if !session.message.is_empty() {
            let row = self.screen.height().saturating_sub(2);
            let msg = format!(" {} ", session.message);
            self.screen.write_text(2, row, &msg);
        }
    }

    fn compose_game(&mut self, session: &Session, glyphs: &GlyphSet) {
        let header = format!(
            " Wayfinder   hints: {}   b hints  e edit  n new  q menu",
            Self::hints_label(session)
        );
        self.screen.write_text(0, 0, &header);

        for (i, row) in render_rows(&session.grid, glyphs, session.show_hints)
            .iter()
            .enumerate()
        {
            self.screen.write_text(0, MAP_ROW + i as u16, row);
        }

        if !session.message.is_empty() {
            let status_row = MAP_ROW + session.grid.height() as u16 + 3;
            let msg = format!(" {} ", session.message);
            self.screen.write_text(0, status_row, &msg);
        }
    }

    fn compose_editor(&mut self, session: &Session, editor: &Editor, glyphs: &GlyphSet) {
        let header = " Editor   1-9/0 stamp  s save  q back to game";
        self.screen.write_text(0, 0, header);

        for (i, row) in render_rows(&session.grid, glyphs, session.show_hints)
            .iter()
            .enumerate()
        {
            self.screen.write_text(0, MAP_ROW + i as u16, row);
        }

        // Cursor overlay; +1 on both axes for the frame border.
        self.screen.write_char(
            editor.cursor.col as u16 + 1,
            MAP_ROW + editor.cursor.row as u16 + 1,
            EDITOR_CURSOR,
        );

        let legend_row = MAP_ROW + session.grid.height() as u16 + 3;
        let legend =
            " 1 player  2 friend  3 enemy  4 path  5 slow  6 fast  7 wall  8 exit  9 crumb  0 clear";
        self.screen.write_text(0, legend_row, legend);

        if !session.message.is_empty() {
            let msg = format!(" {} ", session.message);
            self.screen.write_text(0, legend_row + 2, &msg);
        }
    }

    fn compose_won(&mut self, session: &Session) {
        let box_art = [
            "╔═══════════════════════════════╗",
            "║    ★ YOU FOUND THE WAY ★      ║",
            "╚═══════════════════════════════╝",
        ];
        for (i, line) in box_art.iter().enumerate() {
            self.screen.write_text(6, 4 + i as u16, line);
        }
        self.screen.write_text(8, 9, "▸ any key   next maze");
        self.screen.write_text(8, 10, "▸ Q / ESC   back to title");

        if !session.message.is_empty() {
            let msg = format!(" {} ", session.message);
            self.screen.write_text(6, 13, &msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::CellState;
    use crate::domain::grid::{Grid, Pos};

    fn grid_from(rows: &[&str]) -> Grid {
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => CellState::Obstacle,
                        '=' => CellState::Path,
                        'b' => CellState::Breadcrumb,
                        'P' => CellState::Player,
                        _ => CellState::Undefined,
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(cells)
    }

    #[test]
    fn frame_surrounds_the_grid() {
        let grid = grid_from(&["P.", ".."]);
        let rows = render_rows(&grid, &GlyphSet::default(), false);
        assert_eq!(rows, vec!["┌──┐", "│⚔ │", "│  │", "└──┘"]);
    }

    #[test]
    fn corridors_render_as_connected_runs() {
        let grid = grid_from(&["#####", "#===#", "#####"]);
        let rows = render_rows(&grid, &GlyphSet::default(), false);
        assert_eq!(rows[2], "│█═══█│");
    }

    #[test]
    fn corners_join_vertical_and_horizontal_runs() {
        let grid = grid_from(&["#=#", "#=="]);
        let rows = render_rows(&grid, &GlyphSet::default(), false);
        assert_eq!(rows[1], "│█║█│");
        assert_eq!(rows[2], "│█╚═│");
    }

    #[test]
    fn hidden_crumbs_draw_as_floor() {
        let grid = grid_from(&["b"]);
        let shown = render_rows(&grid, &GlyphSet::default(), true);
        let hidden = render_rows(&grid, &GlyphSet::default(), false);
        assert_eq!(shown[1], "│•│");
        assert_eq!(hidden[1], "│ │");
    }
}
