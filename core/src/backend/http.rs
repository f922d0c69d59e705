//! HTTP Chat Backend
//!
//! JSON-over-HTTP chat service:
//! - `POST <endpoint>` with `{"message": "..."}` answers `{"response": "..."}`
//! - `HEAD <probe_url>` for reachability (defaults to the endpoint's origin,
//!   `http://host:port/`, since the chat route itself only accepts POST)
//!
//! Extra fields in the reply body (such as `success`) are ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use serde::{Deserialize, Serialize};

use super::traits::{BackendReply, ChatBackend};
use crate::config::ClientConfig;
use crate::error::ChatError;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    response: Option<String>,
}

/// HTTP client shared by the backends
///
/// Redirects are not followed, so a 3xx is judged as it arrives.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Root of the server hosting `endpoint`
///
/// `http://localhost:3000/api/chat` becomes `http://localhost:3000/`.
/// An unparseable endpoint is returned unchanged.
pub fn origin_url(endpoint: &str) -> String {
    match reqwest::Url::parse(endpoint).and_then(|url| url.join("/")) {
        Ok(origin) => origin.to_string(),
        Err(e) => {
            tracing::debug!(endpoint, error = %e, "Cannot derive origin, probing endpoint");
            endpoint.to_string()
        }
    }
}

/// Issue a no-body `HEAD` request and report whether the backend is reachable
///
/// True iff a 2xx or 3xx status arrives before `timeout`. Network errors,
/// other statuses and timeouts all yield false. Pass a client from
/// [`build_http_client`]; one that follows redirects judges the target instead.
pub async fn probe_connectivity(
    http_client: &reqwest::Client,
    address: &str,
    timeout: Duration,
) -> bool {
    match http_client.head(address).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(address, status = status.as_u16(), "Connectivity probe answered");
            status.is_success() || status.is_redirection()
        }
        Err(e) => {
            tracing::debug!(address, error = %e, "Connectivity probe failed");
            false
        }
    }
}

/// HTTP chat backend client
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Chat endpoint URL
    endpoint: String,
    /// URL probed for reachability
    probe_url: String,
    /// Bound on the reachability probe
    probe_timeout: Duration,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for the given chat endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let endpoint = endpoint.into();
        Ok(Self {
            probe_url: origin_url(&endpoint),
            endpoint,
            probe_timeout: Duration::from_millis(5000),
            http_client: build_http_client()?,
        })
    }

    /// Create from client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let backend = Self::new(config.endpoint.clone())?.with_probe_timeout(config.probe_timeout);
        Ok(match config.probe_url {
            Some(ref url) => backend.with_probe_url(url.clone()),
            None => backend,
        })
    }

    /// Probe a different URL than the chat endpoint
    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = url.into();
        self
    }

    /// Set the probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Chat endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn probe(&self) -> bool {
        probe_connectivity(&self.http_client, &self.probe_url, self.probe_timeout).await
    }

    async fn send(&self, message: &str) -> Result<BackendReply, ChatError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::ServerError(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ChatResponseBody = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        Ok(BackendReply {
            response: parsed.response,
        })
    }
}
