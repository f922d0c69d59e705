//! Shell Events
//!
//! Intents sent from the UI shell to the chat client. The shell reports what
//! the user did; the client decides what that means for the session.

use serde::{Deserialize, Serialize};

/// Events from the UI shell to the chat client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellEvent {
    /// Chat screen opened; create the session and probe the backend
    StartSession,

    /// User pressed send with the current draft
    SendMessage {
        /// Raw draft text, untrimmed
        text: String,
    },

    /// User flipped the online/offline switch
    ToggleOfflineMode,

    /// Draft text changed
    InputChanged {
        /// Current draft text
        text: String,
    },
}

impl ShellEvent {
    /// Whether handling this event may wait on the network
    pub fn is_network_bound(&self) -> bool {
        matches!(self, ShellEvent::StartSession | ShellEvent::SendMessage { .. })
    }
}
