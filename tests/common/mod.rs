//! Shared helpers for the chess integration tests
#![allow(dead_code)]

use chessgame::chess::{
    Board, Color, Game, MoveRecord, MoveRequest, Piece, PieceType, Player, Square,
};

pub fn sq(s: &str) -> Square {
    s.parse().expect("test square should be valid")
}

pub fn players() -> (Player, Player) {
    (
        Player::new("alice", Color::White),
        Player::new("bob", Color::Black),
    )
}

pub fn new_game() -> (Game, Player, Player) {
    let (white, black) = players();
    let game = Game::new(white.clone(), black.clone()).expect("roster should be valid");
    (game, white, black)
}

/// Play `moves` alternately starting with White, panicking on the first rejection
pub fn play_all(game: &mut Game, moves: &[&str]) -> Vec<MoveRecord> {
    moves
        .iter()
        .map(|text| {
            let player = game.current_turn().clone();
            let request = MoveRequest::parse_for(text, player.color)
                .unwrap_or_else(|e| panic!("'{text}' should parse: {e}"));
            game.play(&player, request)
                .unwrap_or_else(|e| panic!("'{text}' should be legal: {e}"))
        })
        .collect()
}

pub fn board_with(pieces: &[(&str, PieceType, Color)]) -> Board {
    let mut board = Board::empty();
    for &(square, piece_type, color) in pieces {
        board
            .place(sq(square), Some(Piece::new(piece_type, color)))
            .expect("test square should be on the board");
    }
    board
}
