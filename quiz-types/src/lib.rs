//! # quiz-types
//!
//! Wire format types for the zimble trivia game service.
//!
//! This crate provides the JSON shapes exchanged with the remote game
//! service (base path `/api`):
//! - [`GameId`], [`PlayerId`] - Opaque identifiers assigned by the server
//! - [`GameSnapshot`], [`Roster`], [`Player`], [`GameStatus`] - Game state
//! - [`QuestionResponse`], [`AnswerRequest`], [`AnswerResult`] - Question/answer exchange
//! - [`ApiErrorBody`], [`ErrorKind`] - Failure bodies and their structured kind

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod messages;

pub use error::{ErrorKind, TypesError};
pub use ids::{GameId, PlayerId};
pub use messages::{
    AnswerRequest, AnswerResult, ApiErrorBody, ExhaustedNotice, GameSnapshot, GameStatus, Player,
    Question, QuestionResponse, Roster, CORRECT_RESULT,
};
