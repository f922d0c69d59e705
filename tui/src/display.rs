//! Display State
//!
//! The shell's view of the chat session. It is rebuilt from the snapshots
//! the client publishes and holds nothing the client does not already know.
//!
//! Snapshots can arrive out of order when two turns finish close together,
//! so each one carries a revision and anything older than what is already
//! displayed is dropped.

use chrono::{DateTime, Local, Utc};

use parley_core::{ChatMessage, ChatSessionState, Sender, ShellMessage};

/// Session state as last published by the client
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Latest session snapshot
    pub session: ChatSessionState,
    /// Revision of `session`
    revision: u64,
    /// A message was appended since the last frame
    scroll_requested: bool,
}

impl DisplayState {
    /// Create an empty display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message from the client
    pub fn apply_message(&mut self, msg: ShellMessage) {
        match msg {
            ShellMessage::StateChanged { revision, snapshot } => {
                if revision > self.revision {
                    self.revision = revision;
                    self.session = snapshot;
                } else {
                    tracing::trace!(revision, current = self.revision, "Dropping stale snapshot");
                }
            }
            ShellMessage::ScrollToLatest { .. } => {
                self.scroll_requested = true;
            }
        }
    }

    /// Whether a scroll to the newest message is pending; clears the request
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Whether a started session has been received
    ///
    /// A started session always opens with the greeting, so an empty
    /// conversation means the probe is still running.
    pub fn is_ready(&self) -> bool {
        !self.session.messages.is_empty()
    }

    /// Whether the client is waiting on a reply
    pub fn is_loading(&self) -> bool {
        self.session.is_loading
    }

    /// Whether the session is in offline mode
    pub fn is_offline(&self) -> bool {
        self.session.is_offline_mode
    }

    /// Messages in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.session.messages
    }
}

/// Prefix shown before a message's text
pub fn message_prefix(message: &ChatMessage) -> String {
    format!(
        "[{}] {}: ",
        clock_label(message.timestamp),
        message.sender.label()
    )
}

/// Local `HH:MM` for a timestamp
pub fn clock_label(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Whether a message should be drawn on the user's side
pub fn is_from_user(message: &ChatMessage) -> bool {
    message.sender == Sender::User
}
