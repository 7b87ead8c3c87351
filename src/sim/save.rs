/// Map persistence.
///
/// ## File format:
///   One line per map row, cells written as their numeric codes and
///   separated by commas:
///
///     7,7,7,7,7
///     7,1,0,8,7
///     7,7,7,7,7
///
/// Loading is all or nothing: an unknown code, a ragged row, or an
/// empty file fails the whole load, so a broken file never produces a
/// half-parsed map. The caller reports the error and keeps whatever
/// map was active.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::domain::cell::CellState;
use crate::domain::grid::{Grid, Pos};

// ══════════════════════════════════════════════════════════════
// Errors
// ══════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("map file is empty")]
    Empty,
    #[error("line {line}: unknown cell code `{value}`")]
    BadCode { line: usize, value: String },
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ══════════════════════════════════════════════════════════════
// Writing
// ══════════════════════════════════════════════════════════════

pub fn serialize(grid: &Grid) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        let codes: Vec<String> = (0..grid.width())
            .map(|col| grid.at(Pos::new(row, col)).code().to_string())
            .collect();
        out.push_str(&codes.join(","));
        out.push('\n');
    }
    out
}

pub fn save_map(grid: &Grid, path: impl AsRef<Path>) -> Result<(), SaveError> {
    fs::write(path, serialize(grid))?;
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Reading
// ══════════════════════════════════════════════════════════════

pub fn parse(text: &str) -> Result<Grid, SaveError> {
    let mut rows: Vec<Vec<CellState>> = Vec::new();
    let mut expected = 0;

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(expected);
        for field in line.split(',') {
            let field = field.trim();
            let state = field
                .parse::<u8>()
                .ok()
                .and_then(CellState::from_code)
                .ok_or_else(|| SaveError::BadCode {
                    line: index + 1,
                    value: field.to_string(),
                })?;
            row.push(state);
        }

        if rows.is_empty() {
            expected = row.len();
        } else if row.len() != expected {
            return Err(SaveError::RaggedRow {
                line: index + 1,
                expected,
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(SaveError::Empty);
    }
    Ok(Grid::from_rows(rows))
}

pub fn load_map(path: impl AsRef<Path>) -> Result<Grid, SaveError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}
