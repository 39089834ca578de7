use serde::{Deserialize, Serialize};
use std::fmt;

use crate::notation::NotationError;
use crate::terrain::terrain_of;

/// Board size constants
pub const BOARD_SIZE: usize = 6;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Pieces per side: one unicorn and five paladins.
pub const PIECES_PER_SIDE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn unicorn(&self) -> Piece {
        match self {
            Side::Black => Piece::BlackUnicorn,
            Side::White => Piece::WhiteUnicorn,
        }
    }

    pub fn paladin(&self) -> Piece {
        match self {
            Side::Black => Piece::BlackPaladin,
            Side::White => Piece::WhitePaladin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    BlackUnicorn,
    BlackPaladin,
    WhiteUnicorn,
    WhitePaladin,
}

impl Piece {
    pub fn side(&self) -> Side {
        match self {
            Piece::BlackUnicorn | Piece::BlackPaladin => Side::Black,
            Piece::WhiteUnicorn | Piece::WhitePaladin => Side::White,
        }
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.side() == side
    }

    pub fn is_unicorn(&self) -> bool {
        matches!(self, Piece::BlackUnicorn | Piece::WhiteUnicorn)
    }

    pub fn is_paladin(&self) -> bool {
        !self.is_unicorn()
    }

    /// Whether this piece may end a move on a cell held by `target`.
    ///
    /// Only a paladin landing on the enemy unicorn is a capture.
    pub fn can_capture(&self, target: Piece) -> bool {
        self.is_paladin() && target.is_unicorn() && target.side() != self.side()
    }

    /// Single-character symbol used by the board record format.
    pub fn symbol(&self) -> char {
        match self {
            Piece::BlackUnicorn => 'N',
            Piece::BlackPaladin => 'n',
            Piece::WhiteUnicorn => 'B',
            Piece::WhitePaladin => 'b',
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        match c {
            'N' => Some(Piece::BlackUnicorn),
            'n' => Some(Piece::BlackPaladin),
            'B' => Some(Piece::WhiteUnicorn),
            'b' => Some(Piece::WhitePaladin),
            _ => None,
        }
    }
}

/// A board cell. `col` 0..6 is the letter A-F, `row` 0..6 is the rank 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

/// Unchecked serde form of a `Cell`.
#[derive(Deserialize)]
struct RawCell {
    col: usize,
    row: usize,
}

impl TryFrom<RawCell> for Cell {
    type Error = NotationError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Cell::try_new(raw.col, raw.row)
            .ok_or_else(|| NotationError::BadCell(format!("col {}, row {}", raw.col, raw.row)))
    }
}

impl Cell {
    /// Note the argument order: column first, as in the notation "C6".
    pub fn new(col: usize, row: usize) -> Self {
        debug_assert!(col < BOARD_SIZE && row < BOARD_SIZE, "cell out of range");
        Cell { col, row }
    }

    pub fn try_new(col: usize, row: usize) -> Option<Self> {
        (col < BOARD_SIZE && row < BOARD_SIZE).then_some(Cell { col, row })
    }

    /// Dense index in `0..CELL_COUNT`, row-major from A1.
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub fn from_index(index: usize) -> Self {
        Cell::new(index % BOARD_SIZE, index / BOARD_SIZE)
    }

    /// All cells in row-major order from A1 to F6.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(Cell::from_index)
    }

    /// Orthogonal neighbours that lie on the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Cell> {
        let (col, row) = (self.col as i32, self.row as i32);
        [(0, 1), (0, -1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dc, dr)| {
                let (c, r) = (col + dc, row + dr);
                if c < 0 || r < 0 {
                    return None;
                }
                Cell::try_new(c as usize, r as usize)
            })
    }
}

/// One move of the game.
///
/// Equality is structural. The textual notation is a bijection of the
/// structure, so two moves are equal exactly when they print the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub enum Move {
    /// Opening placement: slot 0 is the unicorn, slots 1-5 the paladins.
    Placement([Cell; PIECES_PER_SIDE]),
    Step { from: Cell, to: Cell },
    Pass,
}

/// Serde form of a `Move` before the same checks the notation applies.
#[derive(Deserialize)]
enum RawMove {
    Placement([Cell; PIECES_PER_SIDE]),
    Step { from: Cell, to: Cell },
    Pass,
}

impl TryFrom<RawMove> for Move {
    type Error = NotationError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        match raw {
            RawMove::Placement(cells) => {
                let mv = Move::Placement(cells);
                let mut seen = 0u64;
                for cell in &cells {
                    let bit = 1u64 << cell.index();
                    if seen & bit != 0 {
                        return Err(NotationError::DuplicateCell(mv.to_string()));
                    }
                    seen |= bit;
                }
                Ok(mv)
            }
            RawMove::Step { from, to } if from == to => {
                Err(NotationError::SameCell(Move::step(from, to).to_string()))
            }
            RawMove::Step { from, to } => Ok(Move::step(from, to)),
            RawMove::Pass => Ok(Move::Pass),
        }
    }
}

impl Move {
    pub fn step(from: Cell, to: Cell) -> Self {
        Move::Step { from, to }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, Move::Placement(_))
    }

    pub fn is_step(&self) -> bool {
        matches!(self, Move::Step { .. })
    }
}

/// The full board position.
///
/// `GameState` is a small `Copy` value: search branches take their own copy
/// and never share a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    /// Destination of the last step; `None` after a placement, a pass, or at the start.
    pub(crate) last_destination: Option<Cell>,
    pub(crate) black_placed: bool,
    pub(crate) white_placed: bool,
}

impl GameState {
    /// Create an empty board with neither side placed.
    pub fn new() -> Self {
        GameState {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            last_destination: None,
            black_placed: false,
            white_placed: false,
        }
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board[cell.row][cell.col]
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.piece_at(cell).is_none()
    }

    /// Put a piece on (or clear) a cell directly, bypassing the rules.
    ///
    /// Used to set up positions; placement flags are left untouched.
    pub fn set_piece(&mut self, cell: Cell, piece: Option<Piece>) {
        self.board[cell.row][cell.col] = piece;
    }

    pub fn last_destination(&self) -> Option<Cell> {
        self.last_destination
    }

    pub fn set_last_destination(&mut self, cell: Option<Cell>) {
        self.last_destination = cell;
    }

    /// Terrain class the side to move must start from, if constrained.
    pub fn required_terrain(&self) -> Option<u8> {
        self.last_destination.map(terrain_of)
    }

    pub fn is_placed(&self, side: Side) -> bool {
        match side {
            Side::Black => self.black_placed,
            Side::White => self.white_placed,
        }
    }

    pub fn set_placed(&mut self, side: Side, placed: bool) {
        match side {
            Side::Black => self.black_placed = placed,
            Side::White => self.white_placed = placed,
        }
    }

    /// Cells holding a piece of `side`, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::all().filter_map(move |cell| {
            self.piece_at(cell)
                .filter(|piece| piece.belongs_to(side))
                .map(|piece| (cell, piece))
        })
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    pub fn unicorn_of(&self, side: Side) -> Option<Cell> {
        let unicorn = side.unicorn();
        Cell::all().find(|&cell| self.piece_at(cell) == Some(unicorn))
    }

    /// Apply a move on a copy and return the successor.
    pub fn apply(&self, mv: &Move, side: Side) -> GameState {
        let mut next = *self;
        next.apply_in_place(mv, side);
        next
    }

    /// Apply a move produced by the generator.
    ///
    /// No legality check is made here; contract violations trip debug assertions.
    pub fn apply_in_place(&mut self, mv: &Move, side: Side) {
        match *mv {
            Move::Pass => {
                self.last_destination = None;
            }
            Move::Placement(cells) => {
                debug_assert!(!self.is_placed(side), "{:?} has already placed", side);
                debug_assert!(
                    cells.iter().all(|&cell| self.is_empty(cell)),
                    "placement onto an occupied cell"
                );

                self.set_piece(cells[0], Some(side.unicorn()));
                for &cell in &cells[1..] {
                    self.set_piece(cell, Some(side.paladin()));
                }

                self.set_placed(side, true);
                self.last_destination = None;
            }
            Move::Step { from, to } => {
                debug_assert!(from != to, "step must change cell");
                let piece = self.piece_at(from);
                debug_assert!(
                    piece.is_some_and(|p| p.belongs_to(side)),
                    "no {:?} piece on {}",
                    side,
                    from
                );
                debug_assert!(
                    match (piece, self.piece_at(to)) {
                        (_, None) => true,
                        (Some(mover), Some(target)) => mover.can_capture(target),
                        (None, Some(_)) => false,
                    },
                    "step onto an occupied cell"
                );

                self.set_piece(from, None);
                self.set_piece(to, piece);
                self.last_destination = Some(to);
            }
        }
    }

    /// The game is over once both sides have placed and a unicorn is gone.
    pub fn is_over(&self) -> bool {
        self.black_placed
            && self.white_placed
            && (self.unicorn_of(Side::Black).is_none() || self.unicorn_of(Side::White).is_none())
    }

    /// The side whose unicorn survives, once the game is over.
    ///
    /// Both unicorns missing cannot arise through play and yields `None`.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() {
            return None;
        }
        match (self.unicorn_of(Side::Black), self.unicorn_of(Side::White)) {
            (Some(_), None) => Some(Side::Black),
            (None, Some(_)) => Some(Side::White),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F")?;
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let symbol = self.board[row][col].map_or('-', |piece| piece.symbol());
                write!(f, "{} ", symbol)?;
            }
            writeln!(f, "{}", row + 1)?;
        }
        writeln!(f, "  A B C D E F")?;

        if let Some(cell) = self.last_destination {
            writeln!(f, "Last move to: {} (terrain {})", cell, terrain_of(cell))?;
        }
        Ok(())
    }
}
