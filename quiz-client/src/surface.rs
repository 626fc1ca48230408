//! Presentation surface abstraction.
//!
//! The controller never draws anything itself; it tells a [`Surface`] what
//! to show. A terminal, a GUI or a test recorder can all sit behind it.
//!
//! Surface methods are called while the controller's state is locked, so an
//! implementation must not call back into the controller.

use std::sync::{Arc, Mutex};
use zimble_quiz_core::{Feedback, RosterLine, Tone, ViewState};
use zimble_quiz_types::GameId;

/// Receives everything the player should see.
pub trait Surface: Send + Sync {
    /// Show a feedback message.
    fn feedback(&self, feedback: &Feedback);

    /// Replace the player roster.
    fn roster(&self, lines: &[RosterLine]);

    /// A game was created; hide the start prompt and show its id.
    fn game_started(&self, game_id: &GameId);

    /// Switch the main view. Entering [`ViewState::Question`] also clears the
    /// answer input.
    fn view(&self, view: &ViewState);
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// [`Surface::feedback`]
    Feedback(Feedback),
    /// [`Surface::roster`]
    Roster(Vec<RosterLine>),
    /// [`Surface::game_started`]
    GameStarted(GameId),
    /// [`Surface::view`]
    View(ViewState),
}

/// Surface that records every call, for tests.
///
/// Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All feedback, in order.
    pub fn all_feedback(&self) -> Vec<Feedback> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Feedback(feedback) => Some(feedback),
                _ => None,
            })
            .collect()
    }

    /// Feedback message texts, in order.
    pub fn messages(&self) -> Vec<String> {
        self.all_feedback().into_iter().map(|f| f.message).collect()
    }

    /// Feedback messages with [`Tone::Error`].
    pub fn errors(&self) -> Vec<String> {
        self.all_feedback()
            .into_iter()
            .filter(|f| f.tone == Tone::Error)
            .map(|f| f.message)
            .collect()
    }

    /// The most recent feedback.
    pub fn last_feedback(&self) -> Option<Feedback> {
        self.all_feedback().pop()
    }

    /// All views, in order.
    pub fn views(&self) -> Vec<ViewState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::View(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    /// The view currently shown.
    pub fn last_view(&self) -> Option<ViewState> {
        self.views().pop()
    }

    /// The roster currently shown, rendered as text lines.
    pub fn last_roster(&self) -> Option<Vec<String>> {
        self.events().into_iter().rev().find_map(|event| match event {
            SurfaceEvent::Roster(lines) => Some(lines.iter().map(ToString::to_string).collect()),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Surface for RecordingSurface {
    fn feedback(&self, feedback: &Feedback) {
        self.record(SurfaceEvent::Feedback(feedback.clone()));
    }

    fn roster(&self, lines: &[RosterLine]) {
        self.record(SurfaceEvent::Roster(lines.to_vec()));
    }

    fn game_started(&self, game_id: &GameId) {
        self.record(SurfaceEvent::GameStarted(game_id.clone()));
    }

    fn view(&self, view: &ViewState) {
        self.record(SurfaceEvent::View(view.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_surface_keeps_order() {
        let surface = RecordingSurface::new();
        surface.feedback(&Feedback::neutral("Starting game..."));
        surface.view(&ViewState::Blank);
        surface.feedback(&Feedback::failure("boom"));

        assert_eq!(surface.events().len(), 3);
        assert_eq!(surface.messages(), vec!["Starting game...", "Error: boom"]);
        assert_eq!(surface.errors(), vec!["Error: boom"]);
        assert_eq!(surface.last_view(), Some(ViewState::Blank));
    }

    #[test]
    fn last_roster_renders_lines() {
        let surface = RecordingSurface::new();
        surface.roster(&[RosterLine {
            name: "Alice".into(),
            score: 2,
            is_you: true,
        }]);

        assert_eq!(
            surface.last_roster(),
            Some(vec!["Alice: 2 points (You)".to_string()])
        );
    }

    #[test]
    fn clones_share_recording() {
        let surface = RecordingSurface::new();
        let other = surface.clone();
        other.game_started(&GameId::new("g1").unwrap());

        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::GameStarted(GameId::new("g1").unwrap())]
        );

        surface.clear();
        assert!(other.events().is_empty());
    }
}
