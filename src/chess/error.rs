use super::position::Square;
use thiserror::Error;

/// Every way a request against the chess engine can be refused.
///
/// All variants except [`ChessError::InvariantViolation`] describe caller input
/// and leave the game untouched, so the same player can simply be asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Square ({rank}, {file}) is off the board: rank and file must be 0-7")]
    OutOfBounds { rank: u8, file: u8 },

    #[error("The game is over, no further moves are accepted")]
    GameOver,

    #[error("It is not {0}'s turn")]
    NotYourTurn(String),

    #[error("There is no piece on {0}")]
    EmptyOrigin(Square),

    #[error("The piece on {0} belongs to the other side")]
    WrongPieceOwner(Square),

    #[error("The piece on {from} cannot move to {to}")]
    IllegalGeometry { from: Square, to: Square },

    #[error("Moving {from} to {to} would leave your king in check")]
    SelfCheck { from: Square, to: Square },

    #[error("{0} is not playing in this game")]
    NotAParticipant(String),

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Invalid notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}

/// Name used by the move engine for its failure type.
pub type MoveError = ChessError;

impl ChessError {
    /// True for errors that signal a bug rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChessError::InvariantViolation(_))
    }
}
