/// Keyboard translation.
///
/// The game advances one step per keypress, so every read blocks
/// until a key arrives. Each phase has its own translation table;
/// keys that mean nothing in the current phase are swallowed and the
/// read continues. Terminal resize events surface as `Redraw` so the
/// caller repaints immediately instead of waiting for input.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::cell::CellState;
use crate::domain::grid::Dir;

const KEYS_UP: &[KeyCode] = &[
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
    KeyCode::Char('k'),
    KeyCode::Char('K'),
];
const KEYS_DOWN: &[KeyCode] = &[
    KeyCode::Down,
    KeyCode::Char('s'),
    KeyCode::Char('S'),
    KeyCode::Char('j'),
    KeyCode::Char('J'),
];
const KEYS_LEFT: &[KeyCode] = &[
    KeyCode::Left,
    KeyCode::Char('a'),
    KeyCode::Char('A'),
    KeyCode::Char('h'),
    KeyCode::Char('H'),
];
const KEYS_RIGHT: &[KeyCode] = &[
    KeyCode::Right,
    KeyCode::Char('d'),
    KeyCode::Char('D'),
    KeyCode::Char('l'),
    KeyCode::Char('L'),
];

// The editor reuses S for save and digits for stamping, so cursor
// movement drops the WASD aliases and keeps arrows plus HJKL.
const KEYS_CURSOR_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('K')];
const KEYS_CURSOR_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('J')];
const KEYS_CURSOR_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('H')];
const KEYS_CURSOR_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('l'), KeyCode::Char('L')];

const KEYS_HINTS: &[KeyCode] = &[KeyCode::Char('b'), KeyCode::Char('B')];
const KEYS_EDITOR: &[KeyCode] = &[KeyCode::Char('e'), KeyCode::Char('E')];
const KEYS_NEW: &[KeyCode] = &[KeyCode::Char('n'), KeyCode::Char('N')];
const KEYS_LOAD: &[KeyCode] = &[KeyCode::Char('l'), KeyCode::Char('L')];
const KEYS_SAVE: &[KeyCode] = &[KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_PLAY: &[KeyCode] = &[KeyCode::Char('g'), KeyCode::Char('G'), KeyCode::Enter];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    ToggleHints,
    NewGame,
    EnterEditor,
    LoadMap,
    SaveMap,
    Stamp(CellState),
    Confirm,
    Quit,
    Redraw,
}

/// One keypress inside a text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Char(char),
    Backspace,
    Enter,
    Cancel,
}

pub fn read_menu_command() -> io::Result<Command> {
    read_with(translate_menu)
}

pub fn read_game_command() -> io::Result<Command> {
    read_with(translate_game)
}

pub fn read_editor_command() -> io::Result<Command> {
    read_with(translate_editor)
}

pub fn read_won_command() -> io::Result<Command> {
    read_with(translate_won)
}

/// Blocking read inside a filename prompt. Control characters other
/// than the ones listed in `PromptKey` are swallowed.
pub fn read_prompt_key() -> io::Result<PromptKey> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_ctrl_c(&key) {
                    return Ok(PromptKey::Cancel);
                }
                match key.code {
                    KeyCode::Enter => return Ok(PromptKey::Enter),
                    KeyCode::Esc => return Ok(PromptKey::Cancel),
                    KeyCode::Backspace => return Ok(PromptKey::Backspace),
                    KeyCode::Char(ch) if !ch.is_control() => return Ok(PromptKey::Char(ch)),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn read_with(translate: impl Fn(KeyCode) -> Option<Command>) -> io::Result<Command> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_ctrl_c(&key) {
                    return Ok(Command::Quit);
                }
                if let Some(cmd) = translate(key.code) {
                    return Ok(cmd);
                }
            }
            Event::Resize(..) => return Ok(Command::Redraw),
            _ => {}
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
}

fn translate_menu(code: KeyCode) -> Option<Command> {
    if KEYS_PLAY.contains(&code) {
        Some(Command::NewGame)
    } else if KEYS_EDITOR.contains(&code) {
        Some(Command::EnterEditor)
    } else if KEYS_LOAD.contains(&code) {
        Some(Command::LoadMap)
    } else if KEYS_HINTS.contains(&code) {
        Some(Command::ToggleHints)
    } else if KEYS_QUIT.contains(&code) {
        Some(Command::Quit)
    } else {
        None
    }
}

fn translate_game(code: KeyCode) -> Option<Command> {
    if KEYS_UP.contains(&code) {
        Some(Command::Move(Dir::Up))
    } else if KEYS_DOWN.contains(&code) {
        Some(Command::Move(Dir::Down))
    } else if KEYS_LEFT.contains(&code) {
        Some(Command::Move(Dir::Left))
    } else if KEYS_RIGHT.contains(&code) {
        Some(Command::Move(Dir::Right))
    } else if KEYS_HINTS.contains(&code) {
        Some(Command::ToggleHints)
    } else if KEYS_EDITOR.contains(&code) {
        Some(Command::EnterEditor)
    } else if KEYS_NEW.contains(&code) {
        Some(Command::NewGame)
    } else if KEYS_QUIT.contains(&code) {
        Some(Command::Quit)
    } else {
        None
    }
}

fn translate_editor(code: KeyCode) -> Option<Command> {
    if let KeyCode::Char(ch) = code {
        if let Some(digit) = ch.to_digit(10) {
            // 1-9 stamp the matching cell kind, 0 stamps open floor.
            let state = CellState::from_code(digit as u8)?;
            return Some(Command::Stamp(state));
        }
    }
    if KEYS_CURSOR_UP.contains(&code) {
        Some(Command::Move(Dir::Up))
    } else if KEYS_CURSOR_DOWN.contains(&code) {
        Some(Command::Move(Dir::Down))
    } else if KEYS_CURSOR_LEFT.contains(&code) {
        Some(Command::Move(Dir::Left))
    } else if KEYS_CURSOR_RIGHT.contains(&code) {
        Some(Command::Move(Dir::Right))
    } else if KEYS_SAVE.contains(&code) {
        Some(Command::SaveMap)
    } else if KEYS_QUIT.contains(&code) {
        Some(Command::Quit)
    } else {
        None
    }
}

fn translate_won(code: KeyCode) -> Option<Command> {
    if KEYS_QUIT.contains(&code) {
        Some(Command::Quit)
    } else {
        Some(Command::Confirm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_aliases_agree() {
        for code in [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('K')] {
            assert_eq!(translate_game(code), Some(Command::Move(Dir::Up)));
        }
        assert_eq!(
            translate_game(KeyCode::Char('l')),
            Some(Command::Move(Dir::Right))
        );
    }

    #[test]
    fn editor_digits_stamp_cells() {
        assert_eq!(
            translate_editor(KeyCode::Char('1')),
            Some(Command::Stamp(CellState::Player))
        );
        assert_eq!(
            translate_editor(KeyCode::Char('7')),
            Some(Command::Stamp(CellState::Obstacle))
        );
        assert_eq!(
            translate_editor(KeyCode::Char('0')),
            Some(Command::Stamp(CellState::Undefined))
        );
    }

    #[test]
    fn editor_s_saves_instead_of_moving() {
        assert_eq!(translate_editor(KeyCode::Char('s')), Some(Command::SaveMap));
        assert_eq!(
            translate_editor(KeyCode::Char('j')),
            Some(Command::Move(Dir::Down))
        );
    }

    #[test]
    fn unknown_keys_are_swallowed() {
        assert_eq!(translate_game(KeyCode::Char('z')), None);
        assert_eq!(translate_menu(KeyCode::Char('x')), None);
    }

    #[test]
    fn won_screen_advances_on_any_key() {
        assert_eq!(translate_won(KeyCode::Char(' ')), Some(Command::Confirm));
        assert_eq!(translate_won(KeyCode::Esc), Some(Command::Quit));
    }
}
