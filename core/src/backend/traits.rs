//! Chat Backend Traits
//!
//! The client talks to whatever answers chat messages through this trait.
//! Implementations only move bytes and classify failures; timeouts, retry
//! accounting and fallback all live in the client so every backend gets the
//! same policy.

use async_trait::async_trait;

use crate::error::ChatError;

/// A successful answer from the backend
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendReply {
    /// Reply text, if the backend included one
    pub response: Option<String>,
}

impl BackendReply {
    /// Reply carrying text
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }
}

/// Chat backend trait
///
/// Implement this trait to point the client at a different chat service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Lightweight reachability check
    ///
    /// Returns true iff the backend answered with a success or redirect
    /// status. Any error yields false.
    async fn probe(&self) -> bool;

    /// Send one chat message and wait for the reply
    async fn send(&self, message: &str) -> Result<BackendReply, ChatError>;
}
