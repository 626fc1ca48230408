//! View state machine for the trivia client.
//!
//! This module provides a pure, side-effect-free state machine for the
//! player's view. It takes the outcome of each call to the game service as
//! an [`Event`] and produces the new view plus the follow-up [`Action`]s the
//! client must perform, in order.
//!
//! The actual I/O (HTTP calls, the retry timer, rendering) is performed by
//! quiz-client, not by this module.
//!
//! ```text
//! Idle ──GameCreated──► Blank ──QuestionReceived──► Question
//!                         ▲                            │ AnswerSubmitted
//!             AnswerFailed│                            ▼
//!                         └─────────────────────── Waiting ──(finished)──► Finished
//! ```

use std::time::Duration;
use zimble_quiz_types::{ErrorKind, GameSnapshot, GameStatus};

use crate::{FinalScores, QuestionView};

/// Delay before re-asking for a question when the server reports the game
/// in progress but has no question to serve yet.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// What the player currently sees - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Before the first game is started. Never re-entered.
    #[default]
    Idle,
    /// In a game, with no question, waiting or finished panel shown.
    Blank,
    /// A question is shown and the answer input is open.
    Question(QuestionView),
    /// Waiting on the server (answer in flight, or no question available).
    Waiting,
    /// The game is over.
    Finished(FinalScores),
}

impl ViewState {
    /// Create a state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new view plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (quiz-client)
    /// is responsible for executing the returned actions in order.
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        match (self, event) {
            // A new game always lands in a neutral view, from any state.
            (_, Event::GameCreated) => (Self::Blank, vec![Action::FetchQuestion]),

            // Nothing else can happen before the first game exists.
            (Self::Idle, _) => (Self::Idle, vec![]),

            (_, Event::QuestionReceived(question)) => (Self::Question(question), vec![]),

            // Hide the question; other panels stay as they are.
            (Self::Question(_), Event::QuestionsExhausted) => {
                (Self::Blank, vec![Action::CheckStatus])
            }
            (state, Event::QuestionsExhausted) => (state, vec![Action::CheckStatus]),

            (state, Event::QuestionFailed { kind }) if kind.is_phase_mismatch() => {
                (state, vec![Action::CheckStatus])
            }
            (state, Event::QuestionFailed { .. }) => (state, vec![]),

            // Optimistic: assume the round-trip completes.
            (_, Event::AnswerSubmitted) => (Self::Waiting, vec![]),
            (state, Event::AnswerAccepted) => (state, vec![Action::Reconcile]),
            // The question is not restored after a failed submission.
            (_, Event::AnswerFailed) => (Self::Blank, vec![]),

            (_, Event::Reconciled(Some(Observed::Finished(scores)))) => {
                (Self::Finished(scores), vec![Action::CheckStatus])
            }
            (state, Event::Reconciled(_)) => (state, vec![Action::FetchQuestion]),

            (_, Event::StatusObserved(Observed::Finished(scores))) => {
                (Self::Finished(scores), vec![])
            }
            (_, Event::StatusObserved(Observed::InProgress)) => {
                (Self::Waiting, vec![Action::ScheduleRetry])
            }
            (_, Event::StatusObserved(Observed::Waiting)) | (_, Event::StatusUnavailable) => {
                (Self::Waiting, vec![])
            }
        }
    }

    /// Check if a game has been started.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Check if the game is over.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Game status as observed in a full state fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    /// Not started yet.
    Waiting,
    /// Questions are being served.
    InProgress,
    /// Over, with final standings.
    Finished(FinalScores),
}

impl From<&GameSnapshot> for Observed {
    fn from(game: &GameSnapshot) -> Self {
        match game.status {
            GameStatus::Waiting => Self::Waiting,
            GameStatus::InProgress => Self::InProgress,
            GameStatus::Finished => Self::Finished(FinalScores::from_roster(&game.players)),
        }
    }
}

/// Outcomes fed into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A game was created and a session installed.
    GameCreated,
    /// The server served a question.
    QuestionReceived(QuestionView),
    /// The server has no further question (`{message}` response).
    QuestionsExhausted,
    /// Fetching a question failed.
    QuestionFailed {
        /// Structured kind of the failure.
        kind: ErrorKind,
    },
    /// An answer is about to be sent.
    AnswerSubmitted,
    /// The server accepted the answer.
    AnswerAccepted,
    /// Submitting the answer failed.
    AnswerFailed,
    /// Game state was re-fetched after an answer; `None` if that fetch failed.
    Reconciled(Option<Observed>),
    /// Game state was fetched on the reconciliation path.
    StatusObserved(Observed),
    /// Fetching game state on the reconciliation path failed.
    StatusUnavailable,
}

/// Follow-up work for the client, executed in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ask the server for the next question.
    FetchQuestion,
    /// Fetch full game state and settle the view.
    CheckStatus,
    /// Fetch full game state after an answer before deciding what is next.
    Reconcile,
    /// Schedule one deferred [`Action::FetchQuestion`].
    ScheduleRetry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use zimble_quiz_types::{GameId, Player, PlayerId, Roster};

    fn question(index: u32) -> QuestionView {
        QuestionView {
            index,
            text: format!("question {}", index),
        }
    }

    fn scores() -> FinalScores {
        FinalScores::from_roster(&Roster::new([
            Player::new(PlayerId::new("p1").unwrap(), "Alice", 5),
            Player::new(PlayerId::new("p2").unwrap(), "Bob", 3),
        ]))
    }

    #[test]
    fn starts_idle() {
        let state = ViewState::new();
        assert!(matches!(state, ViewState::Idle));
        assert!(!state.is_active());
    }

    #[test]
    fn idle_ignores_everything_but_game_created() {
        let (state, actions) = ViewState::Idle.on_event(Event::QuestionReceived(question(0)));
        assert_eq!(state, ViewState::Idle);
        assert!(actions.is_empty());

        let (state, actions) = ViewState::Idle.on_event(Event::StatusUnavailable);
        assert_eq!(state, ViewState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn game_created_fetches_first_question() {
        let (state, actions) = ViewState::Idle.on_event(Event::GameCreated);
        assert_eq!(state, ViewState::Blank);
        assert_eq!(actions, vec![Action::FetchQuestion]);
    }

    #[test]
    fn new_game_leaves_finished_view() {
        let (state, actions) = ViewState::Finished(scores()).on_event(Event::GameCreated);
        assert_eq!(state, ViewState::Blank);
        assert_eq!(actions, vec![Action::FetchQuestion]);
    }

    #[test]
    fn question_received_shows_question() {
        let (state, actions) = ViewState::Blank.on_event(Event::QuestionReceived(question(0)));
        assert_eq!(state, ViewState::Question(question(0)));
        assert!(actions.is_empty());
    }

    #[test]
    fn exhaustion_hides_question_and_checks_status() {
        let (state, actions) = ViewState::Question(question(2)).on_event(Event::QuestionsExhausted);
        assert_eq!(state, ViewState::Blank);
        assert_eq!(actions, vec![Action::CheckStatus]);
    }

    #[test]
    fn exhaustion_while_waiting_keeps_waiting_panel() {
        let (state, actions) = ViewState::Waiting.on_event(Event::QuestionsExhausted);
        assert_eq!(state, ViewState::Waiting);
        assert_eq!(actions, vec![Action::CheckStatus]);
    }

    #[test]
    fn phase_mismatch_recovers_via_status_check() {
        for kind in [ErrorKind::GameNotInProgress, ErrorKind::GameFinished] {
            let (state, actions) = ViewState::Waiting.on_event(Event::QuestionFailed { kind });
            assert_eq!(state, ViewState::Waiting);
            assert_eq!(actions, vec![Action::CheckStatus]);
        }
    }

    #[test]
    fn other_question_failures_stop() {
        let (state, actions) = ViewState::Blank.on_event(Event::QuestionFailed {
            kind: ErrorKind::GameNotFound,
        });
        assert_eq!(state, ViewState::Blank);
        assert!(actions.is_empty());
    }

    #[test]
    fn submission_is_optimistic() {
        let (state, actions) = ViewState::Question(question(0)).on_event(Event::AnswerSubmitted);
        assert_eq!(state, ViewState::Waiting);
        assert!(actions.is_empty());
    }

    #[test]
    fn accepted_answer_always_reconciles() {
        let (state, actions) = ViewState::Waiting.on_event(Event::AnswerAccepted);
        assert_eq!(state, ViewState::Waiting);
        assert_eq!(actions, vec![Action::Reconcile]);
    }

    #[test]
    fn failed_answer_does_not_restore_question() {
        let (state, actions) = ViewState::Waiting.on_event(Event::AnswerFailed);
        assert_eq!(state, ViewState::Blank);
        assert!(actions.is_empty());
    }

    #[test]
    fn reconciled_in_progress_fetches_next_question() {
        let (state, actions) =
            ViewState::Waiting.on_event(Event::Reconciled(Some(Observed::InProgress)));
        assert_eq!(state, ViewState::Waiting);
        assert_eq!(actions, vec![Action::FetchQuestion]);
    }

    #[test]
    fn reconcile_failure_counts_as_not_finished() {
        let (_, actions) = ViewState::Waiting.on_event(Event::Reconciled(None));
        assert_eq!(actions, vec![Action::FetchQuestion]);
    }

    #[test]
    fn reconciled_finished_shows_scores_then_checks_status() {
        let (state, actions) =
            ViewState::Waiting.on_event(Event::Reconciled(Some(Observed::Finished(scores()))));
        assert_eq!(state, ViewState::Finished(scores()));
        assert_eq!(actions, vec![Action::CheckStatus]);
        assert!(!actions.contains(&Action::FetchQuestion));
    }

    #[test]
    fn finished_status_is_terminal() {
        let (state, actions) =
            ViewState::Blank.on_event(Event::StatusObserved(Observed::Finished(scores())));
        assert!(state.is_finished());
        assert!(actions.is_empty());
    }

    #[test]
    fn in_progress_status_schedules_one_retry() {
        let (state, actions) = ViewState::Blank.on_event(Event::StatusObserved(Observed::InProgress));
        assert_eq!(state, ViewState::Waiting);
        assert_eq!(actions, vec![Action::ScheduleRetry]);
    }

    #[test]
    fn waiting_status_and_failures_just_wait() {
        let (state, actions) = ViewState::Blank.on_event(Event::StatusObserved(Observed::Waiting));
        assert_eq!(state, ViewState::Waiting);
        assert!(actions.is_empty());

        let (state, actions) = ViewState::Blank.on_event(Event::StatusUnavailable);
        assert_eq!(state, ViewState::Waiting);
        assert!(actions.is_empty());
    }

    #[test]
    fn status_check_is_idempotent() {
        let event = Event::StatusObserved(Observed::Finished(scores()));
        let (first, first_actions) = ViewState::Blank.on_event(event.clone());
        let (second, second_actions) = first.clone().on_event(event);
        assert_eq!(first, second);
        assert_eq!(first_actions, second_actions);

        let event = Event::StatusObserved(Observed::InProgress);
        let (first, first_actions) = ViewState::Blank.on_event(event.clone());
        let (second, second_actions) = first.clone().on_event(event);
        assert_eq!(first, second);
        assert_eq!(first_actions, second_actions);
    }

    #[test]
    fn observed_from_snapshot() {
        let mut game = GameSnapshot {
            id: GameId::new("g1").unwrap(),
            status: GameStatus::Finished,
            players: Roster::new([
                Player::new(PlayerId::new("p1").unwrap(), "Alice", 5),
                Player::new(PlayerId::new("p2").unwrap(), "Bob", 3),
            ]),
            current_question_index: None,
            player_order: None,
        };
        assert_eq!(Observed::from(&game), Observed::Finished(scores()));

        game.status = GameStatus::InProgress;
        assert_eq!(Observed::from(&game), Observed::InProgress);
    }

    #[test]
    fn full_game_flow() {
        // Idle -> created -> question -> submit -> accepted -> reconciled
        let (state, _) = ViewState::Idle.on_event(Event::GameCreated);
        let (state, _) = state.on_event(Event::QuestionReceived(question(0)));
        let (state, _) = state.on_event(Event::AnswerSubmitted);
        assert_eq!(state, ViewState::Waiting);

        let (state, actions) = state.on_event(Event::AnswerAccepted);
        assert_eq!(actions, vec![Action::Reconcile]);

        let (state, actions) = state.on_event(Event::Reconciled(Some(Observed::InProgress)));
        assert_eq!(actions, vec![Action::FetchQuestion]);

        let (state, _) = state.on_event(Event::QuestionReceived(question(1)));
        assert_eq!(state, ViewState::Question(question(1)));
    }
}
