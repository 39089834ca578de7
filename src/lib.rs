//! Rules engine for Escampe, a two-player game on a 6x6 board where the
//! terrain under each piece sets how far it moves.
//!
//! - [`game`] - cells, pieces, moves, the board state and move application
//! - [`movegen`] - legal move generation and legality checks
//! - [`terrain`] - the fixed terrain map
//! - [`config`] - generator settings (placement cap, sampling, home edge)
//! - [`notation`] - move text such as `B1-D1` or `C6/A6/B5/D5/E6/F5`
//! - [`record`] - board files
//! - [`referee`] - turn order and validation for a whole game

pub mod config;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod record;
pub mod referee;
pub mod terrain;

pub use config::*;
pub use game::*;
pub use movegen::*;
pub use notation::*;
pub use referee::*;
pub use terrain::*;
