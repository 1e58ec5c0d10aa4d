use crate::chess::{ChessError, Color, Game, MoveRequest, Square};
use crate::cli::app::Config;
use crate::cli::display::{render_board, render_move_history, render_status};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, error};

const HELP: &str = "\
Commands:
  e2e4, e2-e4, e7e8q   move a piece (optional promotion letter q, r, b, n)
  O-O, O-O-O           castle king side or queen side
  moves <square>       list legal destinations for the piece on a square
  board                show the board again
  history              show the moves played so far
  resign               concede the game
  help                 show this text
  quit                 leave without finishing the game
";

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(MoveRequest),
    Moves(Square),
    Board,
    History,
    Resign,
    Help,
    Quit,
}

impl Command {
    /// Parse a line typed by the player of `color`
    pub fn parse(line: &str, color: Color) -> Result<Self, ChessError> {
        let line = line.trim();
        let mut words = line.split_whitespace();

        match words.next().map(|w| w.to_lowercase()).as_deref() {
            Some("moves") => match (words.next(), words.next()) {
                (Some(square), None) => Ok(Command::Moves(square.parse()?)),
                _ => Err(ChessError::InvalidNotation(
                    "Usage: moves <square>, e.g. 'moves e2'".to_string(),
                )),
            },
            Some("board") => Ok(Command::Board),
            Some("history") => Ok(Command::History),
            Some("resign") => Ok(Command::Resign),
            Some("help") | Some("?") => Ok(Command::Help),
            Some("quit") | Some("exit") => Ok(Command::Quit),
            _ => Ok(Command::Move(MoveRequest::parse_for(line, color)?)),
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The game reached checkmate or resignation
    Finished,
    /// A player typed 'quit'
    Quit,
    /// Input ran out before the game ended
    EndOfInput,
}

/// A hot-seat session: both players share one input stream and take turns.
pub struct GameSession {
    game: Game,
    config: Config,
}

impl GameSession {
    pub fn new(game: Game, config: Config) -> Self {
        Self { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands until the game ends, a player quits, or input runs out.
    ///
    /// Rejected moves are reported and the same player is asked again.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<SessionOutcome> {
        self.show_board(&mut output)?;

        loop {
            if self.game.is_over() {
                writeln!(output, "{}", render_status(&self.game))?;
                return Ok(SessionOutcome::Finished);
            }

            let player = self.game.current_turn().clone();
            write!(output, "{}> ", player.id)?;
            output.flush()?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .context("Failed to read player input")?;
            if read == 0 {
                writeln!(output)?;
                return Ok(SessionOutcome::EndOfInput);
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&line, player.color) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };
            debug!("{} entered {:?}", player, command);

            match command {
                Command::Move(request) => match self.game.play(&player, request) {
                    Ok(record) => {
                        writeln!(output, "{} played {}", player.id, record)?;
                        self.show_board(&mut output)?;
                    }
                    Err(e) if e.is_fatal() => {
                        error!("Engine invariant violated: {}", e);
                        return Err(e.into());
                    }
                    Err(e) => writeln!(output, "{e}")?,
                },
                Command::Moves(square) => {
                    let destinations = self.game.legal_moves_from(square)?;
                    if destinations.is_empty() {
                        writeln!(output, "No legal moves from {square}")?;
                    } else {
                        let list: Vec<String> =
                            destinations.iter().map(|s| s.to_string()).collect();
                        writeln!(output, "{square}: {}", list.join(" "))?;
                    }
                }
                Command::Board => self.show_board(&mut output)?,
                Command::History => {
                    write!(output, "{}", render_move_history(self.game.history()))?
                }
                Command::Resign => self.game.resign(&player)?,
                Command::Help => write!(output, "{HELP}")?,
                Command::Quit => return Ok(SessionOutcome::Quit),
            }
        }
    }

    fn show_board<W: Write>(&self, output: &mut W) -> Result<()> {
        let perspective = if self.config.flip_board {
            self.game.current_turn().color
        } else {
            Color::White
        };
        write!(
            output,
            "{}",
            render_board(
                self.game.board(),
                perspective,
                self.config.board_style,
                self.config.show_coordinates
            )
        )?;
        writeln!(output, "{}", render_status(&self.game))?;
        Ok(())
    }
}
