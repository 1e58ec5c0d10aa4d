use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A square on the 8x8 board, identified by position alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub rank: u8, // 0-7 corresponding to 1-8
    pub file: u8, // 0-7 corresponding to a-h
}

// Deserialized squares go through the same bounds check as `Square::new`
#[derive(Deserialize)]
struct RawSquare {
    rank: u8,
    file: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = ChessError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.rank, raw.file)
    }
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Result<Self, ChessError> {
        if rank > 7 || file > 7 {
            return Err(ChessError::OutOfBounds { rank, file });
        }

        Ok(Self { rank, file })
    }

    /// Create square without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// Create square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::InvalidNotation(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidNotation(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Square {
            rank: rank as u8 - b'1',
            file: file_lower as u8 - b'a',
        })
    }

    pub fn is_valid(&self) -> bool {
        self.rank <= 7 && self.file <= 7
    }

    pub fn file_char(&self) -> char {
        self.file.checked_add(b'a').map_or('?', char::from)
    }

    pub fn rank_char(&self) -> char {
        self.rank.checked_add(b'1').map_or('?', char::from)
    }

    /// Signed (rank, file) displacement from `self` to `other`
    pub fn delta(&self, other: &Square) -> (i8, i8) {
        (
            other.rank as i8 - self.rank as i8,
            other.file as i8 - self.file as i8,
        )
    }

    /// The square reached by stepping `(d_rank, d_file)`, if it is on the board
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::new_unchecked(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// Squares strictly between `self` and `other` along a rank, file or
    /// diagonal. Empty when the two squares are not aligned or are adjacent.
    pub fn between(&self, other: &Square) -> Vec<Square> {
        let (d_rank, d_file) = self.delta(other);
        let aligned = d_rank == 0 || d_file == 0 || d_rank.abs() == d_file.abs();
        if !aligned || (d_rank == 0 && d_file == 0) {
            return Vec::new();
        }

        let step = (d_rank.signum(), d_file.signum());
        let mut squares = Vec::new();
        let mut current = *self;
        while let Some(next) = current.offset(step.0, step.1) {
            if next == *other {
                break;
            }
            squares.push(next);
            current = next;
        }
        squares
    }

    /// All 64 squares, rank by rank starting from a1
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { rank, file }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "({}, {})", self.rank, self.file);
        }
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

// Algebraic notation, e.g. "e4"
impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidNotation(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
