use super::check::legal_destinations;
use super::engine::validate_and_apply;
use super::error::ChessError;
use super::moves::{MoveRecord, MoveRequest};
use super::piece::Color;
use super::position::Square;
use super::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// A participant: an opaque identity plus the side it plays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub color: Color,
}

impl Player {
    pub fn new(id: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            color,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.color)
    }
}

/// Where a game stands. `Check` is informational; `Checkmate` and `Resigned`
/// are terminal and carry the winning side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Check(Color),
    Checkmate(Color),
    Resigned(Color),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Resigned(_))
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(color) | GameStatus::Resigned(color) => Some(*color),
            GameStatus::Active | GameStatus::Check(_) => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "Active"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate(winner) => write!(f, "Checkmate, {winner} wins"),
            GameStatus::Resigned(winner) => {
                write!(f, "{} resigned, {winner} wins", winner.opposite())
            }
        }
    }
}

/// A single game between two players.
///
/// The game owns its board and history; the only ways to change either are
/// [`Game::play`] (and its coordinate form [`Game::submit_move`]) and
/// [`Game::resign`]. Any error leaves the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(super) board: Board,
    pub(super) white: Player,
    pub(super) black: Player,
    pub(super) current_turn: Color,
    pub(super) status: GameStatus,
    pub(super) history: Vec<MoveRecord>,
}

impl Game {
    /// Start a game from the standard position with White to move
    pub fn new(white: Player, black: Player) -> Result<Self, ChessError> {
        if white.color != Color::White || black.color != Color::Black {
            return Err(ChessError::InvalidRoster(format!(
                "expected a White and a Black player, got {white} and {black}"
            )));
        }

        info!("New game: {} vs {}", white, black);
        Ok(Self {
            board: Board::new(),
            white,
            black,
            current_turn: Color::White,
            status: GameStatus::Active,
            history: Vec::new(),
        })
    }

    /// Rebuild a game by resubmitting every recorded move in order
    pub fn replay(white: Player, black: Player, records: &[MoveRecord]) -> Result<Self, ChessError> {
        let mut game = Self::new(white, black)?;
        for record in records {
            game.play(&record.player, record.request())?;
        }
        Ok(game)
    }

    /// Submit a move by raw coordinates (rank, file), each 0-7
    pub fn submit_move(
        &mut self,
        player: &Player,
        origin_rank: u8,
        origin_file: u8,
        dest_rank: u8,
        dest_file: u8,
    ) -> Result<MoveRecord, ChessError> {
        let from = Square::new(origin_rank, origin_file)?;
        let to = Square::new(dest_rank, dest_file)?;
        self.play(player, MoveRequest::new(from, to))
    }

    /// Validate and apply a move request on behalf of `player`
    pub fn play(&mut self, player: &Player, request: MoveRequest) -> Result<MoveRecord, ChessError> {
        validate_and_apply(self, player, request)
    }

    /// Concede the game; the opponent of `player` wins
    pub fn resign(&mut self, player: &Player) -> Result<(), ChessError> {
        if self.status.is_terminal() {
            return Err(ChessError::GameOver);
        }
        if !self.is_participant(player) {
            return Err(ChessError::NotAParticipant(player.id.clone()));
        }

        self.status = GameStatus::Resigned(player.color.opposite());
        info!("{} resigned after {} moves", player, self.history.len());
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose move it is
    pub fn current_turn(&self) -> &Player {
        self.player(self.current_turn)
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn is_participant(&self, player: &Player) -> bool {
        *player == self.white || *player == self.black
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal destinations for the piece on `from`, empty once the game is over
    pub fn legal_moves_from(&self, from: Square) -> Result<Vec<Square>, ChessError> {
        if self.is_over() {
            return Ok(Vec::new());
        }
        legal_destinations(&self.board, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> (Player, Player) {
        (
            Player::new("alice", Color::White),
            Player::new("bob", Color::Black),
        )
    }

    #[test]
    fn new_game_starts_active_with_white_to_move() {
        let (white, black) = players();
        let game = Game::new(white.clone(), black).unwrap();
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.current_turn(), &white);
        assert!(game.history().is_empty());
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn new_game_rejects_wrong_sides() {
        let (white, black) = players();
        assert!(matches!(
            Game::new(black.clone(), white.clone()),
            Err(ChessError::InvalidRoster(_))
        ));
        let other_white = Player::new("carol", Color::White);
        assert!(matches!(
            Game::new(white, other_white),
            Err(ChessError::InvalidRoster(_))
        ));
    }

    #[test]
    fn resign_ends_the_game_for_the_opponent() {
        let (white, black) = players();
        let mut game = Game::new(white, black.clone()).unwrap();

        game.resign(&black).unwrap();
        assert_eq!(game.status(), GameStatus::Resigned(Color::White));
        assert_eq!(game.status().winner(), Some(Color::White));
        assert!(game.is_over());
        assert_eq!(game.resign(&black), Err(ChessError::GameOver));
    }

    #[test]
    fn resign_requires_a_participant() {
        let (white, black) = players();
        let mut game = Game::new(white, black).unwrap();
        let stranger = Player::new("mallory", Color::Black);

        assert_eq!(
            game.resign(&stranger),
            Err(ChessError::NotAParticipant("mallory".to_string()))
        );
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn game_can_be_shared_behind_a_lock() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Game>();

        let (white, black) = players();
        let shared = std::sync::Arc::new(std::sync::Mutex::new(Game::new(white, black).unwrap()));
        let handle = {
            let shared = std::sync::Arc::clone(&shared);
            std::thread::spawn(move || {
                let mut game = shared.lock().unwrap();
                let white = game.current_turn().clone();
                game.submit_move(&white, 1, 3, 3, 3).map(|record| record.to)
            })
        };

        let landed = handle.join().unwrap().unwrap();
        assert_eq!(landed, Square::new_unchecked(3, 3));
        assert_eq!(shared.lock().unwrap().history().len(), 1);
    }

    #[test]
    fn status_display() {
        assert_eq!(
            GameStatus::Resigned(Color::Black).to_string(),
            "White resigned, Black wins"
        );
        assert_eq!(GameStatus::Check(Color::White).to_string(), "White is in check");
        assert!(!GameStatus::Check(Color::White).is_terminal());
    }
}
