//! Check and checkmate detection.
//!
//! Attack queries reuse the movement rules in reverse; hypothetical moves are
//! always played out on a scratch clone of the board.

use super::rules::{attacks, can_reach};
use super::{Board, ChessError, Color, Square};

/// Whether any piece of `by` attacks `square`
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| attacks(board, from, square))
}

/// Whether the king of `color` is currently attacked
pub fn in_check(board: &Board, color: Color) -> Result<bool, ChessError> {
    let king = board.find_king(color)?;
    Ok(is_attacked(board, king, color.opposite()))
}

/// Whether playing `from`-`to` would leave the mover's own king attacked.
///
/// The live board is never touched; the move is applied to a clone.
pub fn leaves_king_in_check(board: &Board, from: Square, to: Square) -> Result<bool, ChessError> {
    let Some(piece) = board.get(from) else {
        return Err(ChessError::EmptyOrigin(from));
    };

    let mut scratch = board.clone();
    scratch.apply_move(from, to, None)?;
    in_check(&scratch, piece.color)
}

/// Every legal destination for the piece on `from`: reachable by the piece
/// rules and not leaving its own king in check
pub fn legal_destinations(board: &Board, from: Square) -> Result<Vec<Square>, ChessError> {
    let mut destinations = Vec::new();
    for to in Square::all() {
        if can_reach(board, from, to) && !leaves_king_in_check(board, from, to)? {
            destinations.push(to);
        }
    }
    Ok(destinations)
}

/// Every legal move for `color` as (origin, destination) pairs
pub fn legal_moves(board: &Board, color: Color) -> Result<Vec<(Square, Square)>, ChessError> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces(color) {
        for to in legal_destinations(board, from)? {
            moves.push((from, to));
        }
    }
    Ok(moves)
}

/// Whether `color` has at least one legal move; stops at the first one found
pub fn has_legal_move(board: &Board, color: Color) -> Result<bool, ChessError> {
    for (from, _) in board.pieces(color) {
        for to in Square::all() {
            if can_reach(board, from, to) && !leaves_king_in_check(board, from, to)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Whether `color` is in check with no legal way out
pub fn is_checkmate(board: &Board, color: Color) -> Result<bool, ChessError> {
    Ok(in_check(board, color)? && !has_legal_move(board, color)?)
}
