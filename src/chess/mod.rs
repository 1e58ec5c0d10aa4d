// Re-export all public items
pub use self::board::{AppliedMove, Board};
pub use self::check::{
    has_legal_move, in_check, is_attacked, is_checkmate, leaves_king_in_check,
    legal_destinations, legal_moves,
};
pub use self::engine::validate_and_apply;
pub use self::error::{ChessError, MoveError};
pub use self::game::{Game, GameStatus, Player};
pub use self::moves::{CastleSide, MoveRecord, MoveRequest};
pub use self::piece::{Color, Piece, PieceType};
pub use self::position::Square;
pub use self::rules::{attacks, can_reach};

// Define submodules
mod board;
mod check;
mod engine;
mod error;
mod game;
mod moves;
mod piece;
mod position;
mod rules;
