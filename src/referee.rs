use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::RulesConfig;
use crate::game::{GameState, Move, Side};
use crate::movegen::Phase;
use crate::notation::NotationError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Game already over")]
    GameOver,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("No legal move for {0}")]
    NoMoves(Side),
    #[error(transparent)]
    Notation(#[from] NotationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won(Side),
}

/// Runs one game: keeps the position, whose turn it is, and the moves played.
///
/// Black places first, then White places and also makes the first step.
/// From there the sides alternate, passes included.
#[derive(Debug, Clone)]
pub struct Referee {
    state: GameState,
    to_move: Side,
    config: RulesConfig,
    history: Vec<(Side, Move)>,
}

impl Referee {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Referee {
            state: GameState::new(),
            to_move: Side::Black,
            config,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn history(&self) -> &[(Side, Move)] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.state.legal_moves_with(self.to_move, &self.config)
    }

    /// Play a move for the side to move.
    #[instrument(level = "trace", skip(self), fields(side = ?self.to_move))]
    pub fn play(&mut self, mv: Move) -> Result<Outcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let side = self.to_move;
        if !self.accepts(&mv, side) {
            if self.state.phase_for(side, &self.config) != Phase::Movement
                && self.state.legal_moves_with(side, &self.config).is_empty()
            {
                return Err(GameError::NoMoves(side));
            }
            return Err(GameError::InvalidMove(format!("{} is not legal for {}", mv, side)));
        }

        self.state.apply_in_place(&mv, side);
        self.history.push((side, mv));
        debug!(%side, mv = %mv, "move played");

        // White makes the first step right after its own placement
        self.to_move = match mv {
            Move::Placement(_) if side == Side::White => Side::White,
            _ => side.opponent(),
        };

        match self.state.winner() {
            Some(winner) => {
                debug!(%winner, moves = self.history.len(), "game over");
                Ok(Outcome::Won(winner))
            }
            None => Ok(Outcome::Ongoing),
        }
    }

    /// Any placement the rules allow is accepted, even one left out of the
    /// capped `legal_moves`. Other moves must be generated ones.
    fn accepts(&self, mv: &Move, side: Side) -> bool {
        match mv {
            Move::Placement(cells) => self.state.is_valid_placement(cells, side, &self.config),
            _ => self.state.is_legal_with(mv, side, &self.config),
        }
    }

    /// Play a move on behalf of `side`, refusing it out of turn.
    pub fn play_as(&mut self, side: Side, mv: Move) -> Result<Outcome, GameError> {
        if side != self.to_move {
            return Err(GameError::NotYourTurn);
        }
        self.play(mv)
    }

    /// Play a move written in notation, e.g. `"B1-D1"`.
    pub fn play_notation(&mut self, text: &str) -> Result<Outcome, GameError> {
        let mv = text.parse()?;
        self.play(mv)
    }
}

impl Default for Referee {
    fn default() -> Self {
        Self::new()
    }
}
