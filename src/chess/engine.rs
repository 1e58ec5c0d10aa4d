//! The move engine: validates a move request against a game and commits it.

use super::check::{has_legal_move, in_check, leaves_king_in_check};
use super::error::MoveError;
use super::game::{Game, GameStatus, Player};
use super::moves::{MoveRecord, MoveRequest};
use super::piece::PieceType;
use super::rules::can_reach;
use super::ChessError;
use tracing::{debug, error, info};

/// Check `request` from `mover` against `game` and, when every check passes,
/// apply it and append it to the history.
///
/// Checks run in a fixed order and stop at the first failure: game still
/// running, mover is a participant and on turn, origin occupied by one of the
/// mover's pieces, piece can reach the destination, promotion choice valid,
/// own king safe afterwards. Nothing is written before all of them pass.
pub fn validate_and_apply(
    game: &mut Game,
    mover: &Player,
    request: MoveRequest,
) -> Result<MoveRecord, MoveError> {
    if let Err(e) = validate(game, mover, request) {
        if e.is_fatal() {
            error!("Invariant violated while validating {}: {}", request, e);
        } else {
            debug!("Rejected {} from {}: {}", request, mover, e);
        }
        return Err(e);
    }

    // Work on a copy so a failure below leaves the live board untouched
    let mut board = game.board.clone();
    let applied = board.apply_move(request.from, request.to, request.promotion)?;

    let opponent = mover.color.opposite();
    let status = if in_check(&board, opponent)? {
        if has_legal_move(&board, opponent)? {
            GameStatus::Check(opponent)
        } else {
            GameStatus::Checkmate(mover.color)
        }
    } else {
        GameStatus::Active
    };

    let record = MoveRecord {
        player: mover.clone(),
        from: request.from,
        to: request.to,
        piece: applied.moved,
        captured: applied.captured,
        castling: applied.castling,
        promotion: applied.promotion,
        status_after: status,
    };

    debug!("{} played {}", mover, record);
    if status != GameStatus::Active {
        info!("{} after {}", status, record);
    }

    game.board = board;
    game.history.push(record.clone());
    game.status = status;
    game.current_turn = opponent;

    Ok(record)
}

fn validate(game: &Game, mover: &Player, request: MoveRequest) -> Result<(), MoveError> {
    let MoveRequest {
        from,
        to,
        promotion,
    } = request;

    if game.status.is_terminal() {
        return Err(ChessError::GameOver);
    }
    if !game.is_participant(mover) {
        return Err(ChessError::NotAParticipant(mover.id.clone()));
    }
    if mover.color != game.current_turn {
        return Err(ChessError::NotYourTurn(mover.id.clone()));
    }

    let piece = game
        .board
        .piece_at(from)?
        .ok_or(ChessError::EmptyOrigin(from))?;
    if piece.color != mover.color {
        return Err(ChessError::WrongPieceOwner(from));
    }

    game.board.piece_at(to)?;
    if !can_reach(&game.board, from, to) {
        return Err(ChessError::IllegalGeometry { from, to });
    }

    if let Some(piece_type) = promotion {
        let promotes =
            piece.piece_type == PieceType::Pawn && to.rank == mover.color.opposite().back_rank();
        if !promotes {
            return Err(ChessError::InvalidPromotion(format!(
                "{from}{to} does not bring a pawn to the last rank"
            )));
        }
        if !piece_type.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(format!(
                "a pawn cannot become a {piece_type:?}"
            )));
        }
    }

    if leaves_king_in_check(&game.board, from, to)? {
        return Err(ChessError::SelfCheck { from, to });
    }

    Ok(())
}
