//! Shell Messages
//!
//! Messages sent from the chat client to the UI shell. The shell holds no
//! chat policy of its own: it renders whatever session snapshot it was last
//! handed and scrolls when told to.
//!
//! State changes carry a full [`ChatSessionState`] snapshot rather than a
//! delta, so a shell that drops or coalesces messages still converges on the
//! latest state.

use serde::{Deserialize, Serialize};

use crate::session::ChatSessionState;

/// Messages from the chat client to the UI shell
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ShellMessage {
    /// Session state changed; render this snapshot
    StateChanged {
        /// Increases with every transition; older snapshots can be dropped
        revision: u64,
        /// Consistent copy of the session after the transition
        snapshot: ChatSessionState,
    },

    /// A message was appended; bring the newest message into view
    ScrollToLatest {
        /// ID of the message that was appended
        message_id: MessageId,
    },
}

/// Who authored a chat message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the shell
    User,
    /// The assistant, whether answered by the backend or locally
    Bot,
}

impl Sender {
    /// Label used when rendering a message
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "Sen",
            Sender::Bot => "Asistan",
        }
    }
}

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
