use crate::chess::{Color, Game, MoveRecord, Player};
use crate::cli::display::{render_board, render_move_history, render_status, BoardStyle};
use crate::cli::game_ops::{GameSession, SessionOutcome};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown for the White player
    pub white_name: String,
    /// Name shown for the Black player
    pub black_name: String,
    /// Unicode figurines or ASCII letters
    pub board_style: BoardStyle,
    /// Draw rank and file labels around the board
    pub show_coordinates: bool,
    /// Draw the board from the side to move instead of always from White
    pub flip_board: bool,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            white_name: "White".to_string(),
            black_name: "Black".to_string(),
            board_style: BoardStyle::Unicode,
            show_coordinates: true,
            flip_board: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "chessgame", "chessgame")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, creating it with defaults if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read configuration file")?;
            let config: Config =
                toml::from_str(&content).context("Failed to parse configuration file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }
}

/// A saved game: the two players and every move in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub white: Player,
    pub black: Player,
    pub moves: Vec<MoveRecord>,
}

impl SavedGame {
    pub fn from_game(game: &Game) -> Self {
        Self {
            white: game.player(Color::White).clone(),
            black: game.player(Color::Black).clone(),
            moves: game.history().to_vec(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read saved game: {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse saved game")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize move history")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write saved game: {}", path.display()))
    }

    /// Replay every move through the engine
    pub fn replay(&self) -> Result<Game> {
        Game::replay(self.white.clone(), self.black.clone(), &self.moves)
            .context("Saved game contains a move the engine rejects")
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
}

impl App {
    /// Load configuration from `config_path`, or the default location
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::default_config_file()?,
        };
        let config =
            Config::load_or_create(&config_path).context("Failed to initialize configuration")?;

        Ok(App {
            config,
            config_path,
        })
    }

    /// Handle the 'play' command on the given input and output
    pub fn handle_play<R: BufRead, W: Write>(
        &self,
        white: Option<String>,
        black: Option<String>,
        save: Option<&Path>,
        style: Option<BoardStyle>,
        input: R,
        output: W,
    ) -> Result<SessionOutcome> {
        let white = Player::new(
            white.unwrap_or_else(|| self.config.white_name.clone()),
            Color::White,
        );
        let black = Player::new(
            black.unwrap_or_else(|| self.config.black_name.clone()),
            Color::Black,
        );
        let game = Game::new(white, black)?;

        let mut config = self.config.clone();
        if let Some(style) = style {
            config.board_style = style;
        }

        let mut session = GameSession::new(game, config);
        let outcome = session.run(input, output)?;

        if let Some(path) = save {
            SavedGame::from_game(session.game()).save(path)?;
            info!(
                "Saved {} moves to {}",
                session.game().history().len(),
                path.display()
            );
        }

        Ok(outcome)
    }

    /// Handle the 'replay' command
    pub fn handle_replay<W: Write>(&self, file: &Path, mut output: W) -> Result<Game> {
        let saved = SavedGame::load(file)?;
        let game = saved.replay()?;

        let perspective = if self.config.flip_board {
            game.current_turn().color
        } else {
            Color::White
        };
        write!(
            output,
            "{}",
            render_board(
                game.board(),
                perspective,
                self.config.board_style,
                self.config.show_coordinates
            )
        )?;
        write!(output, "{}", render_move_history(game.history()))?;
        writeln!(output, "{}", render_status(&game))?;

        Ok(game)
    }

    /// Print the configuration as TOML
    pub fn show_config<W: Write>(&self, mut output: W) -> Result<()> {
        let content =
            toml::to_string_pretty(&self.config).context("Failed to serialize configuration")?;
        writeln!(output, "# {}", self.config_path.display())?;
        write!(output, "{content}")?;
        Ok(())
    }

    /// Overwrite the configuration file with defaults
    pub fn reset_config(&mut self) -> Result<()> {
        self.config = Config::default();
        self.config.save(&self.config_path).context("Failed to save configuration")
    }
}
