//! Board record files.
//!
//! ```text
//! % ABCDEF
//! 01 b-B-b- 01
//! 02 ------ 02
//! ...
//! 06 n-N-n- 06
//! % ABCDEF
//! ```
//!
//! Lines starting with `%` are comments. The only comment read back is
//! `% last D4`, which carries the destination of the last step so that the
//! terrain constraint survives a save. Placement flags are not stored: a side
//! counts as placed when any of its pieces is on the board.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::game::{BOARD_SIZE, Cell, GameState, Piece, Side};
use crate::notation::NotationError;

const HEADER: &str = "% ABCDEF";
const LAST_PREFIX: &str = "% last ";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Line {line}: invalid rank number")]
    BadRank { line: usize },
    #[error("Line {line}: rank {rank} appears twice")]
    DuplicateRank { line: usize, rank: usize },
    #[error("Line {line}: unknown piece symbol '{symbol}'")]
    BadSymbol { line: usize, symbol: char },
    #[error("Line {line}: expected 6 cells")]
    RowLength { line: usize },
    #[error("Rank {0} is missing")]
    MissingRank(usize),
    #[error("More than one {0} unicorn on the board")]
    ExtraUnicorn(Side),
    #[error("Invalid last move marker: {0}")]
    Notation(#[from] NotationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a state in the record format.
pub fn render(state: &GameState) -> String {
    let mut result = String::new();
    result.push_str(HEADER);
    result.push('\n');
    if let Some(cell) = state.last_destination() {
        result.push_str(&format!("{}{}\n", LAST_PREFIX, cell));
    }

    for row in 0..BOARD_SIZE {
        result.push_str(&format!("{:02} ", row + 1));
        for col in 0..BOARD_SIZE {
            let symbol = state.piece_at(Cell::new(col, row)).map_or('-', |p| p.symbol());
            result.push(symbol);
        }
        result.push_str(&format!(" {:02}\n", row + 1));
    }

    result.push_str(HEADER);
    result.push('\n');
    result
}

/// Parse a record. Every rank 1-6 must be present exactly once.
pub fn parse(text: &str) -> Result<GameState, RecordError> {
    let mut state = GameState::new();
    let mut seen = [false; BOARD_SIZE];

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if let Some(cell) = line.strip_prefix(LAST_PREFIX) {
            state.set_last_destination(Some(cell.parse()?));
            continue;
        }
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let (rank, rest) = split_rank(line).ok_or(RecordError::BadRank { line: line_no })?;
        if rank == 0 || rank > BOARD_SIZE {
            return Err(RecordError::BadRank { line: line_no });
        }
        let row = rank - 1;
        if seen[row] {
            return Err(RecordError::DuplicateRank { line: line_no, rank });
        }
        seen[row] = true;

        // The rank number may be repeated at the end of the line
        let body = rest
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .trim_end();
        let symbols: Vec<char> = body.chars().collect();
        if symbols.len() != BOARD_SIZE {
            return Err(RecordError::RowLength { line: line_no });
        }
        for (col, &symbol) in symbols.iter().enumerate() {
            let piece = match symbol {
                '-' => None,
                _ => Some(
                    Piece::from_symbol(symbol)
                        .ok_or(RecordError::BadSymbol { line: line_no, symbol })?,
                ),
            };
            state.set_piece(Cell::new(col, row), piece);
        }
    }

    if let Some(row) = seen.iter().position(|&present| !present) {
        return Err(RecordError::MissingRank(row + 1));
    }

    for side in [Side::Black, Side::White] {
        let unicorns = state
            .pieces(side)
            .filter(|(_, piece)| piece.is_unicorn())
            .count();
        if unicorns > 1 {
            return Err(RecordError::ExtraUnicorn(side));
        }
        let placed = state.piece_count(side) > 0;
        state.set_placed(side, placed);
    }

    Ok(state)
}

/// Split the leading one- or two-digit rank number off a board line.
fn split_rank(line: &str) -> Option<(usize, &str)> {
    let digits = line.bytes().take(2).take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rank = line[..digits].parse().ok()?;
    Some((rank, &line[digits..]))
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<GameState, RecordError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

pub fn save<P: AsRef<Path>>(state: &GameState, path: P) -> Result<(), RecordError> {
    fs::write(path, render(state))?;
    Ok(())
}
