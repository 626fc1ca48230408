//! Text the client shows the player.
//!
//! Formatting lives here rather than in a presentation surface so every
//! surface renders the same labels.

use std::fmt;
use zimble_quiz_types::{AnswerResult, Question, Roster};

use crate::Session;

/// Shown while a game is being created.
pub const STARTING_GAME: &str = "Starting game...";
/// Shown while the next question is requested.
pub const LOADING_QUESTION: &str = "Loading question...";
/// Shown while an answer is in flight.
pub const SUBMITTING: &str = "Submitting...";
/// Validation warning for an empty answer.
pub const EMPTY_ANSWER: &str = "Please enter an answer.";
/// Validation warning for an answer without a game.
pub const NO_ACTIVE_GAME: &str = "Start a game first.";
/// Terminal message once the game is finished.
pub const GAME_OVER: &str = "Game Over!";

/// Semantic category of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Progress and status text.
    Neutral,
    /// Input validation problems.
    Warning,
    /// Correct answers and the end of the game.
    Success,
    /// Failures and incorrect answers.
    Error,
}

/// A feedback line with its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Message text.
    pub message: String,
    /// How the message should be styled.
    pub tone: Tone,
}

impl Feedback {
    /// Neutral status message.
    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Neutral,
        }
    }

    /// Validation warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Warning,
        }
    }

    /// Failure report, prefixed with `Error: `.
    pub fn failure(message: impl fmt::Display) -> Self {
        Self {
            message: format!("Error: {}", message),
            tone: Tone::Error,
        }
    }

    /// End-of-game message.
    pub fn game_over() -> Self {
        Self {
            message: GAME_OVER.to_string(),
            tone: Tone::Success,
        }
    }

    /// Outcome of an answer submission, coloured by correctness.
    pub fn answer_result(result: &AnswerResult) -> Self {
        Self {
            message: format!(
                "Result: {}. Correct Answer: {}",
                result.result, result.correct_answer
            ),
            tone: if result.is_correct() {
                Tone::Success
            } else {
                Tone::Error
            },
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Zero-based index from the server.
    pub index: u32,
    /// Question text.
    pub text: String,
}

impl QuestionView {
    /// One-based number shown to the player.
    pub fn number(&self) -> u64 {
        u64::from(self.index) + 1
    }

    /// Display label, e.g. `Q1: 2+2?`.
    pub fn label(&self) -> String {
        format!("Q{}: {}", self.number(), self.text)
    }
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            index: question.index,
            text: question.text.clone(),
        }
    }
}

/// Final standings, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinalScores {
    entries: Vec<(String, u32)>,
}

impl FinalScores {
    /// Capture names and scores from a roster.
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            entries: roster.iter().map(|p| (p.name.clone(), p.score)).collect(),
        }
    }

    /// Name/score pairs in roster order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }
}

/// Renders as `Alice: 5 | Bob: 3`.
impl fmt::Display for FinalScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, score)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}: {}", name, score)?;
        }
        Ok(())
    }
}

/// One line of the player roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: u32,
    /// True for the player this client controls.
    pub is_you: bool,
}

impl fmt::Display for RosterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} points", self.name, self.score)?;
        if self.is_you {
            f.write_str(" (You)")?;
        }
        Ok(())
    }
}

/// Roster lines in server order, marking the controlled player.
pub fn roster_lines(roster: &Roster, session: &Session) -> Vec<RosterLine> {
    roster
        .iter()
        .map(|p| RosterLine {
            name: p.name.clone(),
            score: p.score,
            is_you: session.is_controlled(&p.id),
        })
        .collect()
}
