//! # zimble-quiz
//!
//! Terminal client for the zimble trivia game service.
//!
//! ## Commands
//!
//! - `play`: Play interactively (default)
//! - `config`: Show the effective configuration
//!
//! ## Example
//!
//! ```bash
//! # Play against a local server
//! zimble-quiz --server http://localhost:8080
//!
//! # Inside the game: start, answer, quit
//! :start
//! 4
//! :quit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod terminal;

use commands::{play, show_config};

/// Terminal client for the zimble trivia game service.
#[derive(Parser, Debug)]
#[command(name = "zimble-quiz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: quiz.toml in the user config directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Game service base URL, overriding the config file
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively (default)
    Play,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loaded = config::load(cli.config.as_deref(), cli.server.as_deref())?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            play::run(&loaded.config).await?;
        }
        Commands::Config => {
            show_config::run(&loaded)?;
        }
    }

    Ok(())
}

/// Log to stderr so diagnostics never mix with the game on stdout.
///
/// Quiet by default (`warn`), `RUST_LOG` overrides, `--verbose` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}
