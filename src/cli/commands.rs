use crate::cli::display::BoardStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chessgame")]
#[command(about = "A two-player chess game for the terminal")]
pub struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game with both sides at this terminal
    ///
    /// Moves are entered in coordinate notation. Type 'help' during the
    /// game for the full list of commands.
    ///
    /// Examples:
    ///   chessgame play
    ///   chessgame play --white alice --black bob
    ///   chessgame play --save game.json
    Play {
        /// Name of the White player (defaults to the configured name)
        #[arg(long)]
        white: Option<String>,
        /// Name of the Black player (defaults to the configured name)
        #[arg(long)]
        black: Option<String>,
        /// Write the move history as JSON when the session ends
        #[arg(short, long)]
        save: Option<PathBuf>,
        /// Override the configured board style
        #[arg(long, value_enum)]
        style: Option<BoardStyle>,
    },

    /// Replay a saved game and show the final position
    ///
    /// Example: chessgame replay game.json
    Replay {
        /// JSON file written by 'play --save'
        file: PathBuf,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration file path
    Path,
    /// Print the current configuration
    Show,
    /// Overwrite the configuration file with defaults
    Reset,
}
