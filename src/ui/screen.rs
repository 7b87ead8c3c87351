/// Double-buffered character screen.
///
/// How it works:
///   1. Build the next frame into `current` with `clear` + `write_*`
///   2. `flush` compares every cell against `previous`
///   3. Only changed cells are queued as terminal commands
///   4. One `writer.flush()` at the end pushes the whole batch
///   5. `previous` is updated cell by cell as changes are emitted
///
/// `flush` reports how many cells it rewrote, which drops to a
/// handful per frame once the map has settled.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

/// Sentinel that never matches a drawable character, so every cell
/// diffs as changed on the next flush.
const INVALID: char = '\0';

pub struct Screen<W: Write> {
    writer: W,
    width: u16,
    height: u16,
    current: Vec<char>,
    previous: Vec<char>,
}

impl<W: Write> Screen<W> {
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        let area = width as usize * height as usize;
        Screen {
            writer,
            width,
            height,
            current: vec![' '; area],
            previous: vec![INVALID; area],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Adopt new terminal dimensions. Both buffers are reallocated
    /// and the terminal is cleared, so the next flush repaints all.
    pub fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        let area = width as usize * height as usize;
        self.current = vec![' '; area];
        self.previous = vec![INVALID; area];
        queue!(self.writer, Clear(ClearType::All))
    }

    /// Blank the frame under construction. The terminal itself is
    /// untouched until `flush`.
    pub fn clear(&mut self) {
        self.current.fill(' ');
    }

    /// Forget the previous frame so the next flush repaints every
    /// cell. Used across phase switches where stale art may linger.
    pub fn invalidate(&mut self) {
        self.previous.fill(INVALID);
    }

    /// Place one character. Coordinates outside the buffer are
    /// dropped silently.
    pub fn write_char(&mut self, x: u16, y: u16, ch: char) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.current[idx] = ch;
    }

    /// Place a string left to right, clipping at the right edge.
    pub fn write_text(&mut self, x: u16, y: u16, text: &str) {
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width {
                break;
            }
            self.write_char(cx, y, ch);
            cx += 1;
        }
    }

    /// Emit every cell that differs from the previous frame and
    /// report how many were rewritten.
    pub fn flush(&mut self) -> io::Result<usize> {
        let mut written = 0;
        let mut need_move = true;
        let mut last_x: u16 = 0;
        let mut last_y: u16 = 0;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y as usize * self.width as usize + x as usize;
                let ch = self.current[idx];
                if ch == self.previous[idx] {
                    need_move = true;
                    continue;
                }

                // After a Print the cursor sits one column right, so
                // runs of adjacent changes need a single MoveTo.
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x, y))?;
                    need_move = false;
                }

                queue!(self.writer, Print(ch))?;
                self.previous[idx] = ch;
                last_x = x;
                last_y = y;
                written += 1;
            }
        }

        self.writer.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_flush_paints_every_cell() {
        let mut screen = Screen::new(Vec::new(), 4, 2);
        screen.write_text(0, 0, "ab");
        assert_eq!(screen.flush().unwrap(), 8);
    }

    #[test]
    fn settled_frame_writes_nothing() {
        let mut screen = Screen::new(Vec::new(), 4, 2);
        screen.write_text(0, 0, "ab");
        screen.flush().unwrap();

        screen.writer_mut().clear();
        screen.clear();
        screen.write_text(0, 0, "ab");
        assert_eq!(screen.flush().unwrap(), 0);
        assert!(screen.writer_mut().is_empty());
    }

    #[test]
    fn single_change_rewrites_one_cell() {
        let mut screen = Screen::new(Vec::new(), 4, 2);
        screen.write_text(0, 0, "ab");
        screen.flush().unwrap();

        screen.clear();
        screen.write_text(0, 0, "aX");
        assert_eq!(screen.flush().unwrap(), 1);
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut screen = Screen::new(Vec::new(), 4, 2);
        screen.flush().unwrap();

        screen.write_char(4, 0, 'x');
        screen.write_char(0, 2, 'x');
        screen.write_char(u16::MAX, u16::MAX, 'x');
        assert_eq!(screen.flush().unwrap(), 0);
    }

    #[test]
    fn text_clips_at_the_right_edge() {
        let mut screen = Screen::new(Vec::new(), 4, 1);
        screen.flush().unwrap();

        screen.write_text(2, 0, "long tail");
        assert_eq!(screen.flush().unwrap(), 2);
    }

    #[test]
    fn invalidate_forces_a_full_repaint() {
        let mut screen = Screen::new(Vec::new(), 3, 1);
        screen.flush().unwrap();

        screen.invalidate();
        assert_eq!(screen.flush().unwrap(), 3);
    }
}
