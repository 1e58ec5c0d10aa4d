use crate::chess::{Board, Color, Game, GameStatus, MoveRecord, Piece, Square};
use serde::{Deserialize, Serialize};

/// How pieces are drawn on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoardStyle {
    Unicode,
    Ascii,
}

/// Render a board from the given side's perspective.
/// White sees rank 1 at the bottom, Black sees rank 8 at the bottom.
pub fn render_board(
    board: &Board,
    perspective: Color,
    style: BoardStyle,
    show_coordinates: bool,
) -> String {
    let ranks: Vec<u8> = match perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };

    let margin = if show_coordinates { "  " } else { "" };
    let mut out = String::new();
    out.push_str(&format!("{margin}┌─┬─┬─┬─┬─┬─┬─┬─┐\n"));

    for (i, &rank) in ranks.iter().enumerate() {
        if show_coordinates {
            out.push_str(&format!("{} ", rank + 1));
        }
        out.push('│');
        for &file in &files {
            let symbol = match board.get(Square::new_unchecked(rank, file)) {
                Some(piece) => piece_symbol(&piece, style),
                None => ' ',
            };
            out.push(symbol);
            out.push('│');
        }
        if show_coordinates {
            out.push_str(&format!(" {}", rank + 1));
        }
        out.push('\n');

        // Separator (except after last rank)
        if i < 7 {
            out.push_str(&format!("{margin}├─┼─┼─┼─┼─┼─┼─┼─┤\n"));
        }
    }

    out.push_str(&format!("{margin}└─┴─┴─┴─┴─┴─┴─┴─┘\n"));
    if show_coordinates {
        let labels: Vec<String> = files
            .iter()
            .map(|file| ((file + b'a') as char).to_string())
            .collect();
        out.push_str(&format!("   {}\n", labels.join(" ")));
    }
    out
}

fn piece_symbol(piece: &Piece, style: BoardStyle) -> char {
    match style {
        BoardStyle::Unicode => piece.symbol(),
        BoardStyle::Ascii => piece.ascii(),
    }
}

/// Format move history as a numbered White/Black table
pub fn render_move_history(history: &[MoveRecord]) -> String {
    if history.is_empty() {
        return "No moves in history.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Move History\n");
    out.push_str("┌──────┬─────────┬─────────┐\n");
    out.push_str("│ Move │  White  │  Black  │\n");
    out.push_str("├──────┼─────────┼─────────┤\n");

    for (i, pair) in history.chunks(2).enumerate() {
        let white_move = pair.first().map(|m| m.to_string()).unwrap_or_default();
        let black_move = pair
            .get(1)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "│ {:>4} │ {:^7} │ {:^7} │\n",
            i + 1,
            white_move,
            black_move
        ));
    }

    out.push_str("└──────┴─────────┴─────────┘\n");
    out
}

/// One-line summary of where the game stands
pub fn render_status(game: &Game) -> String {
    let status = game.status();
    match status {
        GameStatus::Active => format!("{} to move", game.current_turn()),
        GameStatus::Check(_) => format!("Check! {} to move", game.current_turn()),
        GameStatus::Checkmate(winner) | GameStatus::Resigned(winner) => {
            format!("{status}. Winner: {}", game.player(winner))
        }
    }
}
