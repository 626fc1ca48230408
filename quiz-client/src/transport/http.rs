//! HTTP transport backed by reqwest.

use super::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::ClientConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Transport that talks to the game service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the service configured in `config`.
    ///
    /// The per-request timeout is applied by the underlying client.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let api_base = config.api_base();
        let base = Url::parse(&api_base)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(api_base));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { base, http })
    }

    /// The API root requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the full URL for a request. Segments are percent-encoded.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request)?;
        tracing::debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();

        tracing::debug!("response {} ({} bytes)", status, body.len());
        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
