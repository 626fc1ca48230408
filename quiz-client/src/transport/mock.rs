//! Mock transport for testing.
//!
//! Allows queueing responses and capturing sent requests for verification.

use super::{ApiRequest, ApiResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock transport for testing.
///
/// Responses are returned in the order they were queued. Clones share state,
/// so a test can keep a handle after moving one into a controller.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    requests: Vec<ApiRequest>,
    responses: VecDeque<Queued>,
    fail_next: Option<TransportError>,
}

#[derive(Debug)]
struct Queued {
    delay: Option<Duration>,
    result: Result<ApiResponse, TransportError>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by a later `send()` call.
    pub fn queue_response(&self, response: ApiResponse) {
        self.push(None, Ok(response));
    }

    /// Queue a JSON response.
    pub fn queue_json(&self, status: u16, body: serde_json::Value) {
        self.queue_response(ApiResponse::json(status, &body));
    }

    /// Queue a plain text response.
    pub fn queue_text(&self, status: u16, body: &str) {
        self.queue_response(ApiResponse::text(status, body));
    }

    /// Queue a JSON response that arrives only after `delay`.
    pub fn queue_delayed(&self, delay: Duration, status: u16, body: serde_json::Value) {
        self.push(Some(delay), Ok(ApiResponse::json(status, &body)));
    }

    /// Queue a transport failure in response order.
    pub fn queue_error(&self, error: TransportError) {
        self.push(None, Err(error));
    }

    /// Cause the next send() to fail with the given error, without consuming
    /// a queued response.
    pub fn fail_next(&self, error: TransportError) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = Some(error);
    }

    /// Get all requests that were sent.
    pub fn requests(&self) -> Vec<ApiRequest> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// Get the paths of all requests that were sent.
    pub fn paths(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.requests.iter().map(ApiRequest::path).collect()
    }

    /// Get the last request that was sent.
    pub fn last_request(&self) -> Option<ApiRequest> {
        let inner = self.inner.lock().unwrap();
        inner.requests.last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.requests.len()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.responses.len()
    }

    /// Clear all state (requests, queue, forced failure).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
    }

    fn push(&self, delay: Option<Duration>, result: Result<ApiResponse, TransportError>) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(Queued { delay, result });
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let queued = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);

            // Check for forced failure
            if let Some(error) = inner.fail_next.take() {
                return Err(error);
            }

            inner.responses.pop_front()
        };

        let Some(queued) = queued else {
            return Err(TransportError::ConnectionFailed(
                "no response queued".to_string(),
            ));
        };

        if let Some(delay) = queued.delay {
            tokio::time::sleep(delay).await;
        }
        queued.result
    }
}
