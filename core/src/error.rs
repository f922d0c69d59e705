//! Chat Error Taxonomy
//!
//! Every way a chat turn can go wrong, and the text shown to the user for it.
//! None of these are fatal to a session: the client turns each one into a bot
//! message and keeps going.

use thiserror::Error;

/// Reply used when the backend answered successfully but said nothing usable
pub const GENERIC_REPLY: &str = "Üzgünüm, bir hata oluştu.";

const TIMEOUT_TEXT: &str = "İstek zaman aşımına uğradı. İnternet bağlantınızı kontrol edin.";
const NETWORK_TEXT: &str = "Ağ bağlantısı başarısız oldu. İnternet bağlantınızı kontrol edin.";
const UNKNOWN_TEXT: &str = "Bir hata oluştu. Lütfen tekrar deneyin.";

/// Outcome of a chat turn that did not produce a normal reply
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChatError {
    /// No response within the request timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established or was dropped
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Backend answered with a non-success status
    #[error("server error: status {0}")]
    ServerError(u16),

    /// Success status, but the body could not be understood
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Anything else
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ChatError {
    /// Human-readable description appended to the conversation
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Timeout => TIMEOUT_TEXT.to_string(),
            ChatError::NetworkUnavailable(_) => NETWORK_TEXT.to_string(),
            ChatError::ServerError(status) => {
                format!("Sunucu hatası: {status}. Lütfen daha sonra tekrar deneyin.")
            }
            ChatError::MalformedResponse(_) => GENERIC_REPLY.to_string(),
            ChatError::Unknown(_) => UNKNOWN_TEXT.to_string(),
        }
    }

    /// Whether this outcome counts against the retry budget
    ///
    /// A malformed body still came from a live backend, so it is treated as
    /// a success that carries the generic reply.
    pub fn counts_as_failure(&self) -> bool {
        !matches!(self, ChatError::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else if let Some(status) = err.status() {
            ChatError::ServerError(status.as_u16())
        } else if err.is_decode() {
            ChatError::MalformedResponse(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ChatError::NetworkUnavailable(err.to_string())
        } else {
            ChatError::Unknown(err.to_string())
        }
    }
}
