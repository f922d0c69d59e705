//! Demo LLM Backend
//!
//! Public demo completion service:
//! - `POST <endpoint>` with `{"messages": [{"role": ..., "content": ...}]}`
//!   answers `{"completion": "..."}`
//! - `HEAD <probe_url>` for reachability (defaults to the endpoint's origin)
//!
//! History is not replayed. Each request carries the system prompt and the
//! one user message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use super::http::{build_http_client, origin_url, probe_connectivity};
use super::traits::{BackendReply, ChatBackend};
use crate::config::ClientConfig;
use crate::error::ChatError;

/// Default demo completion endpoint
pub const DEFAULT_DEMO_ENDPOINT: &str = "https://api.a0.dev/ai/llm";

/// Instruction sent ahead of every user message
pub const DEMO_SYSTEM_PROMPT: &str =
    "Sen yardımsever bir asistan olarak Türkçe yanıt ver. Kısa ve net cevaplar ver.";

/// Shown when the service answers without a completion
pub const NO_COMPLETION_REPLY: &str = "Üzgünüm, şu anda yanıt veremiyorum.";

#[derive(Serialize)]
struct PromptMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: [PromptMessage<'a>; 2],
}

impl<'a> CompletionRequest<'a> {
    fn new(system: &'a str, user: &'a str) -> Self {
        Self {
            messages: [
                PromptMessage {
                    role: "system",
                    content: system,
                },
                PromptMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

#[derive(Deserialize)]
struct CompletionBody {
    #[serde(default)]
    completion: Option<String>,
}

/// Demo LLM completion client
#[derive(Clone, Debug)]
pub struct DemoLlmBackend {
    endpoint: String,
    probe_url: String,
    probe_timeout: Duration,
    http_client: reqwest::Client,
}

impl DemoLlmBackend {
    /// Create a backend for the given completion endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let endpoint = endpoint.into();
        Ok(Self {
            probe_url: origin_url(&endpoint),
            endpoint,
            probe_timeout: Duration::from_millis(5000),
            http_client: build_http_client()?,
        })
    }

    /// Create from client configuration (uses `demo_endpoint`)
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut backend = Self::new(config.demo_endpoint.clone())?;
        backend.probe_timeout = config.probe_timeout;
        if let Some(ref url) = config.probe_url {
            backend.probe_url = url.clone();
        }
        Ok(backend)
    }

    /// Completion endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for DemoLlmBackend {
    fn name(&self) -> &str {
        "DemoLLM"
    }

    async fn probe(&self) -> bool {
        probe_connectivity(&self.http_client, &self.probe_url, self.probe_timeout).await
    }

    async fn send(&self, message: &str) -> Result<BackendReply, ChatError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&CompletionRequest::new(DEMO_SYSTEM_PROMPT, message.trim()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::ServerError(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: CompletionBody = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .completion
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_COMPLETION_REPLY.to_string());
        Ok(BackendReply::text(text))
    }
}
