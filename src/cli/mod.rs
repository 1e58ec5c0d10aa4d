pub mod app;
pub mod commands;
pub mod display;
pub mod game_ops;

pub use app::{App, Config, SavedGame};
pub use commands::{Cli, Commands, ConfigCommand};
pub use display::{render_board, render_move_history, render_status, BoardStyle};
pub use game_ops::{Command, GameSession, SessionOutcome};
