//! Terminal rendering of the game.

use std::io::Write;
use std::sync::Mutex;
use zimble_quiz_client::Surface;
use zimble_quiz_core::{Feedback, RosterLine, Tone, ViewState};
use zimble_quiz_types::GameId;

/// Prompt shown before the first game.
pub const START_PROMPT: &str = "Type :start to begin a new game.";

/// A [`Surface`] that prints to a writer (stdout in the binary).
pub struct TerminalSurface<W> {
    out: Mutex<W>,
}

impl TerminalSurface<std::io::Stdout> {
    /// Print to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Print to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn print(&self, text: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::debug!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn feedback(&self, feedback: &Feedback) {
        self.print(&format_feedback(feedback));
    }

    fn roster(&self, lines: &[RosterLine]) {
        self.print(&format_roster(lines));
    }

    fn game_started(&self, game_id: &GameId) {
        self.print(&format!("Game ID: {}", game_id));
    }

    fn view(&self, view: &ViewState) {
        if let Some(text) = format_view(view) {
            self.print(&text);
        }
    }
}

/// Feedback line with a tone marker.
pub fn format_feedback(feedback: &Feedback) -> String {
    let marker = match feedback.tone {
        Tone::Neutral => "  ",
        Tone::Warning => "! ",
        Tone::Success => "+ ",
        Tone::Error => "x ",
    };
    format!("{}{}", marker, feedback.message)
}

/// Roster block, one indented line per player.
pub fn format_roster(lines: &[RosterLine]) -> String {
    let mut text = String::from("Players:");
    for line in lines {
        text.push_str("\n  ");
        text.push_str(&line.to_string());
    }
    text
}

/// Text for a view, or `None` when the view shows nothing.
pub fn format_view(view: &ViewState) -> Option<String> {
    match view {
        ViewState::Idle => Some(START_PROMPT.to_string()),
        ViewState::Blank => None,
        ViewState::Question(question) => Some(format!("\n{}\n> answer:", question.label())),
        ViewState::Waiting => Some("Waiting...".to_string()),
        ViewState::Finished(scores) => Some(format!("Final Scores: {}", scores)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zimble_quiz_core::{FinalScores, QuestionView};
    use zimble_quiz_types::{Player, PlayerId, Roster};

    #[test]
    fn feedback_marks_tone() {
        assert_eq!(
            format_feedback(&Feedback::warning("Please enter an answer.")),
            "! Please enter an answer."
        );
        assert_eq!(format_feedback(&Feedback::failure("boom")), "x Error: boom");
        assert_eq!(format_feedback(&Feedback::game_over()), "+ Game Over!");
    }

    #[test]
    fn roster_block_lists_players() {
        let lines = vec![
            RosterLine {
                name: "Player1".into(),
                score: 2,
                is_you: true,
            },
            RosterLine {
                name: "Player2".into(),
                score: 1,
                is_you: false,
            },
        ];
        assert_eq!(
            format_roster(&lines),
            "Players:\n  Player1: 2 points (You)\n  Player2: 1 points"
        );
    }

    #[test]
    fn views_render_as_text() {
        assert_eq!(format_view(&ViewState::Idle).as_deref(), Some(START_PROMPT));
        assert_eq!(format_view(&ViewState::Blank), None);
        assert_eq!(
            format_view(&ViewState::Question(QuestionView {
                index: 0,
                text: "2+2?".into()
            }))
            .as_deref(),
            Some("\nQ1: 2+2?\n> answer:")
        );

        let scores = FinalScores::from_roster(&Roster::new([
            Player::new(PlayerId::new("p1").unwrap(), "A", 5),
            Player::new(PlayerId::new("p2").unwrap(), "B", 3),
        ]));
        assert_eq!(
            format_view(&ViewState::Finished(scores)).as_deref(),
            Some("Final Scores: A: 5 | B: 3")
        );
    }

    #[test]
    fn surface_writes_lines() {
        let surface = TerminalSurface::new(Vec::new());
        surface.game_started(&GameId::new("g42").unwrap());
        surface.view(&ViewState::Blank);
        surface.feedback(&Feedback::neutral("Loading question..."));

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(output, "Game ID: g42\n  Loading question...\n");
    }
}
