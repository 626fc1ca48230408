//! Error types for the game service wire format.

use thiserror::Error;

/// Errors raised while constructing wire types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// An identifier was empty.
    #[error("empty {kind} id")]
    EmptyId {
        /// Which identifier was empty ("game" or "player").
        kind: &'static str,
    },
}

/// Structured classification of a failure reported by the game service.
///
/// Servers that send a `code` field in their error body are classified by
/// that code. Servers that only send prose fall back to matching the message
/// text, which is what older deployments of the service do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The game id is unknown to the server.
    GameNotFound,
    /// The game exists but is not accepting questions/answers yet or anymore.
    GameNotInProgress,
    /// The game has already run out of questions.
    GameFinished,
    /// The player id is not part of the game.
    PlayerNotFound,
    /// The request body was rejected.
    InvalidRequest,
    /// Anything else, including transport failures.
    Other,
}

impl ErrorKind {
    /// Map a structured error code to a kind.
    ///
    /// Unknown codes map to [`ErrorKind::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "game_not_found" => Self::GameNotFound,
            "game_not_in_progress" => Self::GameNotInProgress,
            "game_finished" => Self::GameFinished,
            "player_not_found" => Self::PlayerNotFound,
            "invalid_request" => Self::InvalidRequest,
            _ => Self::Other,
        }
    }

    /// Classify a failure message that carries no structured code.
    ///
    /// Substrings are matched ignoring ASCII case, so `"Game Finished"`
    /// classifies the same as `"game finished"`. This is looser than an exact
    /// `"not in progress"`/`"finished"` match but agrees with it on every
    /// message the service sends.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("not in progress") {
            Self::GameNotInProgress
        } else if lower.contains("finished") {
            Self::GameFinished
        } else if lower.contains("player not found") {
            Self::PlayerNotFound
        } else if lower.contains("game not found") {
            Self::GameNotFound
        } else if lower.contains("invalid request") {
            Self::InvalidRequest
        } else {
            Self::Other
        }
    }

    /// Classify a failure from its optional code and message.
    ///
    /// A known code wins over the message text.
    pub fn classify(code: Option<&str>, message: &str) -> Self {
        match code.map(Self::from_code) {
            Some(kind) if kind != Self::Other => kind,
            _ => Self::from_message(message),
        }
    }

    /// True when the failure means the client's idea of the game phase is
    /// behind the server's (the game is no longer, or not yet, in progress).
    pub fn is_phase_mismatch(&self) -> bool {
        matches!(self, Self::GameNotInProgress | Self::GameFinished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TypesError::EmptyId { kind: "game" };
        assert_eq!(err.to_string(), "empty game id");
    }

    #[test]
    fn codes_map_to_kinds() {
        assert_eq!(
            ErrorKind::from_code("game_not_in_progress"),
            ErrorKind::GameNotInProgress
        );
        assert_eq!(ErrorKind::from_code("game_finished"), ErrorKind::GameFinished);
        assert_eq!(ErrorKind::from_code("teapot"), ErrorKind::Other);
    }

    #[test]
    fn server_messages_are_classified() {
        assert_eq!(
            ErrorKind::from_message("Game is not in progress"),
            ErrorKind::GameNotInProgress
        );
        assert_eq!(
            ErrorKind::from_message("Game has already finished"),
            ErrorKind::GameFinished
        );
        assert_eq!(
            ErrorKind::from_message("Player not found in this game"),
            ErrorKind::PlayerNotFound
        );
        assert_eq!(
            ErrorKind::from_message("Game not found"),
            ErrorKind::GameNotFound
        );
        assert_eq!(
            ErrorKind::from_message("HTTP error! status: 500"),
            ErrorKind::Other
        );
    }

    #[test]
    fn message_matching_ignores_case() {
        assert_eq!(
            ErrorKind::from_message("Game Is Not In Progress"),
            ErrorKind::GameNotInProgress
        );
        assert_eq!(ErrorKind::from_message("FINISHED"), ErrorKind::GameFinished);
    }

    #[test]
    fn code_wins_over_message() {
        let kind = ErrorKind::classify(Some("game_not_found"), "Game has already finished");
        assert_eq!(kind, ErrorKind::GameNotFound);
    }

    #[test]
    fn unknown_code_falls_back_to_message() {
        let kind = ErrorKind::classify(Some("something_new"), "Game is not in progress");
        assert_eq!(kind, ErrorKind::GameNotInProgress);
    }

    #[test]
    fn only_phase_kinds_are_mismatches() {
        assert!(ErrorKind::GameNotInProgress.is_phase_mismatch());
        assert!(ErrorKind::GameFinished.is_phase_mismatch());
        assert!(!ErrorKind::GameNotFound.is_phase_mismatch());
        assert!(!ErrorKind::Other.is_phase_mismatch());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypesError>();
    }
}
