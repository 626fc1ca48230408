//! Game service adapter.
//!
//! [`GameApi`] sits between the controller and a [`Transport`]. It turns raw
//! responses into typed values or an [`ApiError`], and it reports every
//! failure to the player exactly once, as `Error: <message>`, before handing
//! it back. Callers therefore never show errors themselves.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use zimble_quiz_core::Feedback;
use zimble_quiz_types::{
    AnswerRequest, AnswerResult, ApiErrorBody, ErrorKind, GameId, GameSnapshot, QuestionResponse,
};

use crate::surface::Surface;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

/// A failed call to the game service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was obtained.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Application {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or `HTTP error! status: <status>`.
        message: String,
        /// Structured classification.
        kind: ErrorKind,
    },

    /// A success response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The service broke the protocol in a way the client cannot use.
    #[error("{0}")]
    Protocol(String),
}

impl ApiError {
    /// Structured kind of this failure. Only application failures carry a
    /// specific kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Application { kind, .. } => *kind,
            _ => ErrorKind::Other,
        }
    }
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The response announced JSON.
    Json(serde_json::Value),
    /// Any other content type, as text.
    Text(String),
}

/// Typed access to the game service.
pub struct GameApi<T, S> {
    transport: T,
    surface: Arc<S>,
}

impl<T: Transport, S: Surface> GameApi<T, S> {
    /// Create an adapter reporting failures to `surface`.
    pub fn new(transport: T, surface: Arc<S>) -> Self {
        Self { transport, surface }
    }

    /// `POST /games`
    pub async fn create_game(&self) -> Result<GameSnapshot, ApiError> {
        self.call_json(ApiRequest::post(["games"])).await
    }

    /// `GET /games/{id}/question`
    pub async fn next_question(&self, game_id: &GameId) -> Result<QuestionResponse, ApiError> {
        self.call_json(ApiRequest::get(["games", game_id.as_str(), "question"]))
            .await
    }

    /// `POST /games/{id}/answer`
    pub async fn submit_answer(
        &self,
        game_id: &GameId,
        answer: &AnswerRequest,
    ) -> Result<AnswerResult, ApiError> {
        let body =
            serde_json::to_value(answer).map_err(|e| self.report(ApiError::Protocol(e.to_string())))?;
        self.call_json(ApiRequest::post(["games", game_id.as_str(), "answer"]).with_json(body))
            .await
    }

    /// `GET /games/{id}`
    pub async fn game_state(&self, game_id: &GameId) -> Result<GameSnapshot, ApiError> {
        self.call_json(ApiRequest::get(["games", game_id.as_str()]))
            .await
    }

    /// Send a request and decode the success payload.
    pub async fn call(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        let response = self.fetch(request).await?;
        if response.is_json() {
            serde_json::from_slice(&response.body)
                .map(Payload::Json)
                .map_err(|e| self.report(ApiError::Decode(e.to_string())))
        } else {
            Ok(Payload::Text(
                String::from_utf8_lossy(&response.body).into_owned(),
            ))
        }
    }

    /// Decode straight from the body so object keys keep their document order.
    async fn call_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.fetch(request).await?;
        if !response.is_json() {
            return Err(self.report(ApiError::Decode(format!(
                "expected JSON, got {:?}",
                String::from_utf8_lossy(&response.body)
            ))));
        }
        serde_json::from_slice(&response.body)
            .map_err(|e| self.report(ApiError::Decode(e.to_string())))
    }

    /// Send a request, turning transport failures and non-2xx statuses into errors.
    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = request.with_header("Accept", "application/json");
        let path = request.path();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| self.report(e.into()))?;

        if !response.is_success() {
            let err = application_error(&response);
            tracing::debug!("{} failed with status {}", path, response.status);
            return Err(self.report(err));
        }
        Ok(response)
    }

    /// Show a failure to the player and log it. Returns the error for `?`.
    pub(crate) fn report(&self, err: ApiError) -> ApiError {
        tracing::warn!("game service call failed: {}", err);
        self.surface.feedback(&Feedback::failure(&err));
        err
    }
}

/// Build the error for a non-2xx response.
fn application_error(response: &ApiResponse) -> ApiError {
    let body: ApiErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
    let message = body
        .error
        .clone()
        .unwrap_or_else(|| format!("HTTP error! status: {}", response.status));
    ApiError::Application {
        status: response.status,
        kind: ErrorKind::classify(body.code.as_deref(), &message),
        message,
    }
}
