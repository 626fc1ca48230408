//! Transport abstraction for quiz-client.
//!
//! This module provides a pluggable transport layer that abstracts
//! the underlying request mechanism (HTTP via reqwest, mock for testing).
//!
//! # Design
//!
//! The transport is request/response oriented and knows nothing about the
//! game: it turns an [`ApiRequest`] (method, path segments below the API
//! root, optional JSON body) into an [`ApiResponse`] (status, content type,
//! raw body). Interpreting status codes and bodies is the job of
//! [`GameApi`](crate::GameApi).
//!
//! A [`TransportError`] means no response was obtained at all. A response
//! with a non-2xx status is still a successful transport call.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.queue_json(201, json!({"id": "g1", "players": {}}));
//! let response = transport.send(ApiRequest::post(["games"])).await?;
//! ```

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the service failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The request failed after connecting (body read, redirect, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The configured service URL cannot be used.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only request.
    Get,
    /// Request that changes server state.
    Post,
}

/// A request to the game service, relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path segments below the API root, unescaped.
    pub segments: Vec<String>,
    /// Extra headers, in the order they were added.
    pub headers: Vec<(String, String)>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// A GET request.
    pub fn get<I, P>(segments: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST request without a body.
    pub fn post<I, P>(segments: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            method: Method::Post,
            ..Self::get(segments)
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header called `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Attach a JSON body.
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The path below the API root, e.g. `games/g1/question`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

/// A response from the game service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// A JSON response.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    /// A plain text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into().into_bytes(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the content type announces JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Transport trait for exchanging requests with the game service.
///
/// Implementations handle the underlying mechanism (HTTP, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for its response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
