//! Text notation for cells, moves and sides.
//!
//! - cell: `C6` (column letter A-F, rank 1-6)
//! - step: `B1-D1`
//! - placement: `C6/A6/B5/D5/E6/F5`, unicorn first
//! - pass: `E`

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::game::{BOARD_SIZE, Cell, Move, PIECES_PER_SIDE, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("Empty move")]
    Empty,
    #[error("Invalid cell: {0}")]
    BadCell(String),
    #[error("A placement needs 6 cells: {0}")]
    WrongPlacementArity(String),
    #[error("Invalid step: {0}")]
    BadStep(String),
    #[error("Step must change cell: {0}")]
    SameCell(String),
    #[error("Placement uses a cell twice: {0}")]
    DuplicateCell(String),
    #[error("Unrecognized move: {0}")]
    Unrecognized(String),
    #[error("Unknown side: {0} (use 'noir'/'black' or 'blanc'/'white')")]
    UnknownSide(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
    }
}

impl FromStr for Cell {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || NotationError::BadCell(s.to_string());
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(bad());
        }
        let col = bytes[0].to_ascii_uppercase().wrapping_sub(b'A') as usize;
        let row = bytes[1].wrapping_sub(b'1') as usize;
        if col >= BOARD_SIZE || row >= BOARD_SIZE {
            return Err(bad());
        }
        Ok(Cell::new(col, row))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "E"),
            Move::Step { from, to } => write!(f, "{}-{}", from, to),
            Move::Placement(cells) => {
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, "/")?;
                    }
                    write!(f, "{}", cell)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_uppercase();
        if text.is_empty() {
            return Err(NotationError::Empty);
        }

        if text == "E" {
            return Ok(Move::Pass);
        }

        if text.contains('-') {
            let parts: Vec<&str> = text.split('-').collect();
            let [from, to] = parts[..] else {
                return Err(NotationError::BadStep(text.clone()));
            };
            let (from, to) = match (from.parse::<Cell>(), to.parse::<Cell>()) {
                (Ok(from), Ok(to)) => (from, to),
                _ => return Err(NotationError::BadStep(text.clone())),
            };
            if from == to {
                return Err(NotationError::SameCell(text.clone()));
            }
            return Ok(Move::step(from, to));
        }

        if text.contains('/') {
            let parts: Vec<&str> = text.split('/').collect();
            if parts.len() != PIECES_PER_SIDE {
                return Err(NotationError::WrongPlacementArity(text.clone()));
            }
            let mut cells = [Cell::new(0, 0); PIECES_PER_SIDE];
            for (slot, part) in cells.iter_mut().zip(&parts) {
                *slot = part.parse()?;
            }
            let mut seen = 0u64;
            for cell in &cells {
                let bit = 1u64 << cell.index();
                if seen & bit != 0 {
                    return Err(NotationError::DuplicateCell(text.clone()));
                }
                seen |= bit;
            }
            return Ok(Move::Placement(cells));
        }

        Err(NotationError::Unrecognized(text))
    }
}

impl Side {
    /// Name used by the game server protocol.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Side::Black => "noir",
            Side::White => "blanc",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

impl FromStr for Side {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noir" | "black" => Ok(Side::Black),
            "blanc" | "white" => Ok(Side::White),
            _ => Err(NotationError::UnknownSide(s.to_string())),
        }
    }
}
