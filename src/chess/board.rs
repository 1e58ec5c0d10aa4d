use super::moves::CastleSide;
use super::{ChessError, Color, Piece, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// What [`Board::apply_move`] changed, for building the move record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The piece as it stood on the origin square before moving
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub castling: Option<CastleSide>,
    pub promotion: Option<PieceType>,
}

/// Represents a chess board as an 8x8 grid of optional pieces.
///
/// The board is plain value data: rule checks read it, and hypothetical moves
/// are tried on a clone so the live board is never touched mid-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// squares[rank][file] where rank 0 = rank 1, file 0 = file a
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create a new board with the standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    /// Create a board with no pieces, for building positions by hand
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Get the piece at the specified square, if any
    pub fn piece_at(&self, square: Square) -> Result<Option<Piece>, ChessError> {
        if !square.is_valid() {
            return Err(ChessError::OutOfBounds {
                rank: square.rank,
                file: square.file,
            });
        }

        Ok(self.squares[square.rank as usize][square.file as usize])
    }

    /// Like [`Board::piece_at`], treating off-board squares as empty
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.piece_at(square).ok().flatten()
    }

    /// Unconditionally write a square
    pub fn place(&mut self, square: Square, piece: Option<Piece>) -> Result<(), ChessError> {
        if !square.is_valid() {
            return Err(ChessError::OutOfBounds {
                rank: square.rank,
                file: square.file,
            });
        }

        self.squares[square.rank as usize][square.file as usize] = piece;
        Ok(())
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// All occupied squares holding a piece of `color`
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.get(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    /// Locate the single king of `color`
    pub fn find_king(&self, color: Color) -> Result<Square, ChessError> {
        let mut kings = self
            .pieces(color)
            .filter(|(_, piece)| piece.is_king())
            .map(|(square, _)| square);

        match (kings.next(), kings.next()) {
            (Some(square), None) => Ok(square),
            (None, _) => Err(ChessError::InvariantViolation(format!(
                "{color} has no king on the board"
            ))),
            (Some(first), Some(second)) => Err(ChessError::InvariantViolation(format!(
                "{color} has more than one king ({first}, {second})"
            ))),
        }
    }

    fn setup_starting_position(&mut self) {
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            self.squares[0][file] = Some(Piece::new(piece_type, Color::White));
            self.squares[1][file] = Some(Piece::new(PieceType::Pawn, Color::White));
            self.squares[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
            self.squares[7][file] = Some(Piece::new(piece_type, Color::Black));
        }
    }

    /// Relocate the piece on `from` to `to`, removing any occupant of `to`.
    ///
    /// A king moving two files is a castle and takes its rook along; a pawn
    /// reaching the far rank becomes `promotion` (queen when `None`). Legality
    /// is the caller's concern. The board is only written once every piece
    /// involved has been found, so a failed call leaves it unchanged.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<AppliedMove, ChessError> {
        let moved = self.piece_at(from)?.ok_or(ChessError::EmptyOrigin(from))?;
        let captured = self.piece_at(to)?;

        let castling = match moved.piece_type {
            PieceType::King if from.rank == to.rank && from.file.abs_diff(to.file) == 2 => {
                Some(if to.file > from.file {
                    CastleSide::KingSide
                } else {
                    CastleSide::QueenSide
                })
            }
            _ => None,
        };

        let rook_move = match castling {
            Some(side) => {
                let rook_from = Square::new_unchecked(from.rank, side.rook_file());
                let rook_to = Square::new_unchecked(from.rank, side.rook_destination_file());
                let rook = self
                    .get(rook_from)
                    .filter(|p| p.piece_type == PieceType::Rook && p.color == moved.color)
                    .ok_or_else(|| {
                        ChessError::InvariantViolation(format!(
                            "No {} rook on {rook_from} to castle with",
                            moved.color
                        ))
                    })?;
                Some((rook_from, rook_to, rook))
            }
            None => None,
        };

        let promotion = match moved.piece_type {
            PieceType::Pawn if to.rank == moved.color.opposite().back_rank() => {
                Some(promotion.unwrap_or(PieceType::Queen))
            }
            _ => None,
        };

        let mut landed = moved.moved();
        if let Some(piece_type) = promotion {
            landed.piece_type = piece_type;
        }

        self.place(from, None)?;
        self.place(to, Some(landed))?;
        if let Some((rook_from, rook_to, rook)) = rook_move {
            self.place(rook_from, None)?;
            self.place(rook_to, Some(rook.moved()))?;
        }

        Ok(AppliedMove {
            moved,
            captured,
            castling,
            promotion,
        })
    }

    /// Display the board as ASCII art from White's perspective
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();
        result.push_str("  a b c d e f g h\n");

        for display_rank in (0..8).rev() {
            let rank_number = display_rank + 1;
            result.push_str(&format!("{rank_number} "));

            let row: Vec<String> = self.squares[display_rank]
                .iter()
                .map(|square| match square {
                    Some(piece) => piece.ascii().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            result.push_str(&row.join(" "));

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn piece_at_rejects_off_board_squares() {
        let board = Board::new();
        assert_eq!(
            board.piece_at(Square::new_unchecked(8, 2)),
            Err(ChessError::OutOfBounds { rank: 8, file: 2 })
        );
        assert_eq!(board.get(Square::new_unchecked(2, 8)), None);
    }

    #[test]
    fn find_king_reports_missing_and_duplicate_kings() {
        let mut board = Board::empty();
        assert!(matches!(
            board.find_king(Color::White),
            Err(ChessError::InvariantViolation(_))
        ));

        let king = Some(Piece::new(PieceType::King, Color::White));
        board.place(sq("e1"), king).unwrap();
        assert_eq!(board.find_king(Color::White), Ok(sq("e1")));

        board.place(sq("e4"), king).unwrap();
        assert!(board.find_king(Color::White).unwrap_err().is_fatal());
    }

    #[test]
    fn apply_move_captures_and_marks_moved() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceType::Knight, Color::White);
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        board.place(sq("d4"), Some(knight)).unwrap();
        board.place(sq("f5"), Some(pawn)).unwrap();

        let applied = board.apply_move(sq("d4"), sq("f5"), None).unwrap();
        assert_eq!(applied.moved, knight);
        assert_eq!(applied.captured, Some(pawn));
        assert_eq!(applied.castling, None);
        assert_eq!(board.get(sq("d4")), None);
        assert_eq!(board.get(sq("f5")), Some(knight.moved()));
    }

    #[test]
    fn apply_move_castles_with_rook() {
        let mut board = Board::empty();
        board
            .place(sq("e8"), Some(Piece::new(PieceType::King, Color::Black)))
            .unwrap();
        board
            .place(sq("a8"), Some(Piece::new(PieceType::Rook, Color::Black)))
            .unwrap();

        let applied = board.apply_move(sq("e8"), sq("c8"), None).unwrap();
        assert_eq!(applied.castling, Some(CastleSide::QueenSide));
        assert_eq!(board.get(sq("a8")), None);
        assert_eq!(board.get(sq("e8")), None);
        assert_eq!(
            board.get(sq("d8")).map(|p| p.piece_type),
            Some(PieceType::Rook)
        );
        assert_eq!(
            board.get(sq("c8")).map(|p| p.piece_type),
            Some(PieceType::King)
        );
    }

    #[test]
    fn apply_move_without_rook_leaves_board_unchanged() {
        let mut board = Board::empty();
        board
            .place(sq("e1"), Some(Piece::new(PieceType::King, Color::White)))
            .unwrap();
        let before = board.clone();

        assert!(board.apply_move(sq("e1"), sq("g1"), None).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn apply_move_promotes_on_far_rank() {
        let mut board = Board::empty();
        board
            .place(sq("b7"), Some(Piece::new(PieceType::Pawn, Color::White)))
            .unwrap();

        let applied = board.apply_move(sq("b7"), sq("b8"), None).unwrap();
        assert_eq!(applied.promotion, Some(PieceType::Queen));
        assert_eq!(
            board.get(sq("b8")).map(|p| p.piece_type),
            Some(PieceType::Queen)
        );

        board
            .place(sq("g2"), Some(Piece::new(PieceType::Pawn, Color::Black)))
            .unwrap();
        board
            .apply_move(sq("g2"), sq("g1"), Some(PieceType::Knight))
            .unwrap();
        assert_eq!(
            board.get(sq("g1")).map(|p| p.piece_type),
            Some(PieceType::Knight)
        );
    }

    #[test]
    fn ascii_shows_starting_ranks() {
        let ascii = Board::new().to_ascii();
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[5], "4 . . . . . . . . 4");
        assert_eq!(lines[8], "1 R N B Q K B N R 1");
    }
}
