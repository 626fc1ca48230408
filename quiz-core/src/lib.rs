//! # quiz-core
//!
//! Pure logic for the zimble trivia client (no I/O, instant tests).
//!
//! This crate decides what the player should see next given the outcome of
//! each call to the game service, without performing any of those calls.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about view transitions
//!
//! The actual I/O (HTTP, timers, rendering) is performed by `quiz-client`,
//! which interprets the actions produced by the view state machine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod progress;
pub mod render;
pub mod session;
pub mod state;

pub use progress::{Anomaly, ProgressTracker};
pub use render::{
    roster_lines, Feedback, FinalScores, QuestionView, RosterLine, Tone, EMPTY_ANSWER, GAME_OVER,
    LOADING_QUESTION, NO_ACTIVE_GAME, STARTING_GAME, SUBMITTING,
};
pub use session::{Session, SessionError};
pub use state::{Action, Event, Observed, ViewState, DEFAULT_RETRY_DELAY};
