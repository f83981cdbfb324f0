//! Text form of a board: one line per row, one character per cell.
//!
//! Owned cells are written as the base-36 digit of their owner index and
//! empty cells as [`EMPTY_MARK`].

use super::board::Cell;
use crate::error::NotationError;

pub const EMPTY_MARK: char = '_';

const RADIX: u32 = 36;

pub fn encode_cell(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_MARK,
        Cell::Owned(seat) => std::char::from_digit(seat as u32, RADIX).unwrap_or('?'),
    }
}

/// Decode a single mark. Ownership is not checked against a roster here.
pub fn decode_cell(mark: char, row: usize, col: usize) -> Result<Cell, NotationError> {
    if mark == EMPTY_MARK {
        return Ok(Cell::Empty);
    }
    // Uppercase digits are not produced by encode_cell, so they are not accepted.
    if mark.is_ascii_uppercase() {
        return Err(NotationError::UnknownMark { row, col, mark });
    }
    mark.to_digit(RADIX)
        .map(|d| Cell::Owned(d as u8))
        .ok_or(NotationError::UnknownMark { row, col, mark })
}

/// Split board text into rows of decoded cells, checking that it is
/// rectangular. Returns `(width, rows)`.
pub(crate) fn decode_rows(text: &str) -> Result<(usize, Vec<Vec<Cell>>), NotationError> {
    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    // Only trailing blank lines are padding; an interior one is a short row.
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let Some(first) = lines.first() else {
        return Err(NotationError::Empty);
    };

    let width = first.chars().count();
    let mut rows = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(NotationError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }
        let cells = line
            .chars()
            .enumerate()
            .map(|(col, mark)| decode_cell(mark, row, col))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }

    Ok((width, rows))
}
