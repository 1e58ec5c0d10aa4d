use anyhow::Result;
use chessgame::cli::{App, Cli, Commands, ConfigCommand, SessionOutcome};
use clap::Parser;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize tracing: RUST_LOG wins, then --verbose, then the configured level
fn init_tracing(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(cli.config)?;
    init_tracing(&app.config.log_level, cli.verbose);
    info!("Using configuration at {}", app.config_path.display());

    match cli.command {
        Commands::Play {
            white,
            black,
            save,
            style,
        } => {
            let stdin = io::stdin();
            let outcome = app.handle_play(
                white,
                black,
                save.as_deref(),
                style,
                stdin.lock(),
                io::stdout(),
            )?;
            if outcome != SessionOutcome::Finished {
                warn!("Session ended before the game was decided ({:?})", outcome);
            }
        }
        Commands::Replay { file } => {
            app.handle_replay(&file, io::stdout())?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Path => println!("{}", app.config_path.display()),
            ConfigCommand::Show => app.show_config(io::stdout())?,
            ConfigCommand::Reset => {
                app.reset_config()?;
                println!("Configuration reset: {}", app.config_path.display());
            }
        },
    }

    Ok(())
}
