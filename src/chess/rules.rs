//! Per-piece movement rules.
//!
//! [`can_reach`] answers whether the piece on a square may geometrically move
//! to another square on the given board: shape, path obstruction, pawn
//! direction, castling preconditions. Turn order and self-check are the move
//! engine's concern and are not looked at here. Nothing in this module
//! mutates the board.

use super::check::is_attacked;
use super::moves::CastleSide;
use super::{Board, Piece, PieceType, Square};

const KING_FILE: u8 = 4;

/// Whether the piece standing on `from` may move to `to`.
///
/// False when `from` is empty, when the squares coincide, or when `to` holds a
/// piece of the mover's own side.
pub fn can_reach(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if from == to || !to.is_valid() {
        return false;
    }
    if board.get(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    match piece.piece_type {
        PieceType::Pawn => pawn_can_reach(board, piece, from, to),
        PieceType::King => is_king_step(from, to) || can_castle(board, piece, from, to),
        PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            attacks(board, from, to)
        }
    }
}

/// Whether the piece on `from` attacks `to`, regardless of what stands on `to`.
///
/// Pawns attack only along their forward capture diagonals and kings only the
/// eight neighbouring squares; castling never attacks anything.
pub fn attacks(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if from == to || !to.is_valid() {
        return false;
    }

    let (d_rank, d_file) = from.delta(&to);
    match piece.piece_type {
        PieceType::Pawn => d_rank == piece.color.forward() && d_file.abs() == 1,
        PieceType::Knight => is_knight_jump(d_rank, d_file),
        PieceType::King => is_king_step(from, to),
        PieceType::Bishop => is_diagonal(d_rank, d_file) && path_is_clear(board, from, to),
        PieceType::Rook => is_straight(d_rank, d_file) && path_is_clear(board, from, to),
        PieceType::Queen => {
            (is_diagonal(d_rank, d_file) || is_straight(d_rank, d_file))
                && path_is_clear(board, from, to)
        }
    }
}

fn pawn_can_reach(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    let forward = pawn.color.forward();
    let (d_rank, d_file) = from.delta(&to);

    match (d_rank, d_file.abs()) {
        // capture
        (r, 1) if r == forward => board
            .get(to)
            .is_some_and(|target| target.color != pawn.color),
        // single step
        (r, 0) if r == forward => board.is_empty(to),
        // double step from the home rank
        (r, 0) if r == 2 * forward => {
            !pawn.has_moved
                && from.rank == pawn.color.pawn_rank()
                && board.is_empty(to)
                && path_is_clear(board, from, to)
        }
        _ => false,
    }
}

fn is_knight_jump(d_rank: i8, d_file: i8) -> bool {
    let (r, f) = (d_rank.abs(), d_file.abs());
    r * f == 2
}

fn is_king_step(from: Square, to: Square) -> bool {
    let (d_rank, d_file) = from.delta(&to);
    d_rank.abs().max(d_file.abs()) == 1
}

fn is_diagonal(d_rank: i8, d_file: i8) -> bool {
    d_rank.abs() == d_file.abs() && d_rank != 0
}

fn is_straight(d_rank: i8, d_file: i8) -> bool {
    (d_rank == 0) != (d_file == 0)
}

/// Every square strictly between `from` and `to` is empty
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    from.between(&to)
        .into_iter()
        .all(|square| board.is_empty(square))
}

/// Castling preconditions for the king standing on `from`:
/// king and rook unmoved, nothing between them, and neither the king's square,
/// the square it crosses nor the square it lands on attacked.
fn can_castle(board: &Board, king: Piece, from: Square, to: Square) -> bool {
    if king.has_moved
        || from.rank != king.color.back_rank()
        || from.file != KING_FILE
        || to.rank != from.rank
        || from.file.abs_diff(to.file) != 2
    {
        return false;
    }

    let side = if to.file > from.file {
        CastleSide::KingSide
    } else {
        CastleSide::QueenSide
    };

    let rook_square = Square::new_unchecked(from.rank, side.rook_file());
    let rook_ready = board.get(rook_square).is_some_and(|rook| {
        rook.piece_type == PieceType::Rook && rook.color == king.color && !rook.has_moved
    });
    if !rook_ready || !path_is_clear(board, from, rook_square) {
        return false;
    }

    let enemy = king.color.opposite();
    let transit = Square::new_unchecked(from.rank, side.rook_destination_file());
    [from, transit, to]
        .into_iter()
        .all(|square| !is_attacked(board, square, enemy))
}
