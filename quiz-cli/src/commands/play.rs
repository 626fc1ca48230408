//! Interactive game loop.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use zimble_quiz_client::{ClientConfig, GameController, HttpTransport, Surface};
use zimble_quiz_core::{Feedback, ViewState, NO_ACTIVE_GAME};

use crate::terminal::{format_feedback, TerminalSurface};

const HELP: &str = "\
Commands:
  :start, :new   Start a new game
  :next          Load the current question again
  :help          Show this help
  :quit, :q      Leave
Anything else is submitted as your answer.";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Next,
    Help,
    Quit,
    Answer(String),
    Unknown(String),
}

/// Interpret a line typed at the prompt.
///
/// Lines starting with `:` are commands. Everything else, including a
/// blank line, is an answer.
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Answer(line.trim_end_matches(['\r', '\n']).to_string());
    };
    match command.to_ascii_lowercase().as_str() {
        "start" | "new" => Input::Start,
        "next" => Input::Next,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

/// Run the play command until `:quit` or end of input.
pub async fn run(config: &ClientConfig) -> Result<()> {
    let transport = HttpTransport::new(config).context("Invalid server URL")?;
    let surface = TerminalSurface::stdout();

    println!("zimble-quiz connected to {}", config.api_base());
    println!("{}", HELP);
    surface.view(&ViewState::Idle);

    let controller = GameController::new(transport, surface, config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_input(&line) {
            Input::Start => controller.start_game().await,
            Input::Next if !controller.view().is_active() => {
                println!("{}", format_feedback(&Feedback::warning(NO_ACTIVE_GAME)));
            }
            Input::Next => controller.fetch_question().await,
            Input::Answer(text) => controller.submit_answer(&text).await,
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Unknown(command) => {
                let feedback = Feedback::warning(format!("Unknown command {}. Try :help", command));
                println!("{}", format_feedback(&feedback));
            }
        }
    }

    tracing::debug!("leaving game loop");
    Ok(())
}
