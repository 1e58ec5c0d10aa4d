use super::error::ChessError;
use super::game::{GameStatus, Player};
use super::piece::{Color, Piece, PieceType};
use super::position::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// File the participating rook starts on
    pub fn rook_file(&self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File the rook lands on, which is also the square the king crosses
    pub fn rook_destination_file(&self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// File the king lands on
    pub fn king_destination_file(&self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::KingSide => write!(f, "O-O"),
            CastleSide::QueenSide => write!(f, "O-O-O"),
        }
    }
}

/// A requested move in coordinate form, before any legality checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parse move text with color context so castling resolves to the right rank.
    ///
    /// Accepts `e2e4`, `e2-e4`, `e2 e4`, `e7e8q` and `O-O` / `O-O-O` (or with zeros).
    pub fn parse_for(s: &str, color: Color) -> Result<Self, ChessError> {
        let s = s.trim();

        let castle = match s.to_uppercase().as_str() {
            "O-O" | "0-0" => Some(CastleSide::KingSide),
            "O-O-O" | "0-0-0" => Some(CastleSide::QueenSide),
            _ => None,
        };
        if let Some(side) = castle {
            let rank = color.back_rank();
            return Ok(Self::new(
                Square::new_unchecked(rank, 4),
                Square::new_unchecked(rank, side.king_destination_file()),
            ));
        }

        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
            return Err(ChessError::InvalidNotation(format!(
                "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling."
            )));
        }

        let from = compact[0..2].parse::<Square>()?;
        let to = compact[2..4].parse::<Square>()?;
        let promotion = match compact.get(4..5) {
            Some(letter) => Some(letter.parse::<PieceType>()?),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_string().to_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for MoveRequest {
    type Err = ChessError;

    /// Castling text resolves to White's back rank; use [`MoveRequest::parse_for`]
    /// when the side to move is known.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_for(s, Color::White)
    }
}

/// One applied move in a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub from: Square,
    pub to: Square,
    /// The piece as it stood before the move
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castling: Option<CastleSide>,
    pub promotion: Option<PieceType>,
    /// Status the game entered once this move was played
    pub status_after: GameStatus,
}

impl MoveRecord {
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The request that reproduces this move
    pub fn request(&self) -> MoveRequest {
        MoveRequest {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

// Long algebraic with check/mate suffix: e2e4, e7e8q+, O-O#
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.castling {
            Some(side) => write!(f, "{side}")?,
            None => write!(f, "{}", self.request())?,
        }
        match self.status_after {
            GameStatus::Check(_) => write!(f, "+"),
            GameStatus::Checkmate(_) => write!(f, "#"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn parses_coordinate_forms() {
        let expected = MoveRequest::new(sq("e2"), sq("e4"));
        assert_eq!("e2e4".parse::<MoveRequest>().unwrap(), expected);
        assert_eq!("e2-e4".parse::<MoveRequest>().unwrap(), expected);
        assert_eq!(" E2 e4 ".parse::<MoveRequest>().unwrap(), expected);
    }

    #[test]
    fn parses_promotion_letter() {
        let request: MoveRequest = "a7a8n".parse().unwrap();
        assert_eq!(
            request,
            MoveRequest::with_promotion(sq("a7"), sq("a8"), PieceType::Knight)
        );
        assert_eq!(request.to_string(), "a7a8n");
    }

    #[test]
    fn castling_uses_side_back_rank() {
        assert_eq!(
            MoveRequest::parse_for("O-O", Color::White).unwrap(),
            MoveRequest::new(sq("e1"), sq("g1"))
        );
        assert_eq!(
            MoveRequest::parse_for("0-0-0", Color::Black).unwrap(),
            MoveRequest::new(sq("e8"), sq("c8"))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "e2", "e2e", "e2e9", "z1a1", "e2e4qq", "e7e8x", "é2e4"] {
            assert!(
                matches!(
                    text.parse::<MoveRequest>(),
                    Err(ChessError::InvalidNotation(_))
                ),
                "'{text}' should be rejected"
            );
        }
    }

    #[test]
    fn castle_side_files() {
        assert_eq!(CastleSide::KingSide.rook_file(), 7);
        assert_eq!(CastleSide::QueenSide.rook_destination_file(), 3);
        assert_eq!(CastleSide::QueenSide.to_string(), "O-O-O");
    }
}
