//! Session State
//!
//! The chat session is a single value: an append-only message list plus the
//! flags that drive routing (loading, offline, retry count). All transitions
//! live here as plain synchronous methods so they can be applied atomically
//! under one lock and tested without a runtime.
//!
//! Nothing here is persisted. A session starts with the chat screen and is
//! dropped with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, GENERIC_REPLY};
use crate::messages::{MessageId, Sender};

/// Announcement appended when the user switches to offline mode
pub const OFFLINE_ANNOUNCEMENT: &str =
    "Çevrimdışı moda geçildi. Sadece basit yanıtlar alabilirsiniz.";

/// Announcement appended when the user switches back to online mode
pub const ONLINE_ANNOUNCEMENT: &str = "Çevrimiçi moda geçildi. Tam işlevli yanıtlar alabilirsiniz.";

/// A message in the conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Message text
    pub text: String,
    /// Who sent this message
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

/// Where an accepted send will be answered from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendRoute {
    /// Issue a request to the chat backend
    Network,
    /// Answer locally from the fallback set
    Fallback,
}

/// A send that passed the guards and is now in flight
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    /// ID of the user message that was appended
    pub message_id: MessageId,
    /// How the turn will be answered
    pub route: SendRoute,
}

/// State of one chat session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionState {
    /// Conversation in display order
    pub messages: Vec<ChatMessage>,
    /// A turn is in flight; new sends are ignored until it completes
    pub is_loading: bool,
    /// Sends are answered locally without contacting the backend
    pub is_offline_mode: bool,
    /// Consecutive failed requests since the last success
    pub retry_count: u32,
    /// Draft text currently in the input box
    pub pending_input_text: String,
}

impl ChatSessionState {
    /// Start a session with a greeting from the bot
    pub fn new(greeting: &str, is_offline_mode: bool) -> Self {
        Self {
            messages: vec![ChatMessage::bot(greeting)],
            is_loading: false,
            is_offline_mode,
            retry_count: 0,
            pending_input_text: String::new(),
        }
    }

    /// Most recent message, if any
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Whether sends should bypass the network
    pub fn should_use_fallback(&self, max_retries: u32) -> bool {
        self.is_offline_mode || self.retry_count >= max_retries
    }

    /// Accept a send if the guards allow it
    ///
    /// Blank text and sends while another turn is loading return `None` and
    /// leave the state untouched. Otherwise the trimmed text is appended as a
    /// user message, the draft is cleared and the session enters loading.
    pub fn begin_send(&mut self, raw_text: &str, max_retries: u32) -> Option<PendingSend> {
        let text = raw_text.trim();
        if text.is_empty() || self.is_loading {
            return None;
        }

        let message = ChatMessage::user(text);
        let message_id = message.id.clone();
        self.messages.push(message);
        self.pending_input_text.clear();
        self.is_loading = true;

        let route = if self.should_use_fallback(max_retries) {
            SendRoute::Fallback
        } else {
            SendRoute::Network
        };

        Some(PendingSend { message_id, route })
    }

    /// Complete a turn with a reply from the backend
    ///
    /// An absent or empty reply is shown as the generic apology.
    pub fn complete_with_reply(&mut self, reply: Option<String>) -> MessageId {
        let text = reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| GENERIC_REPLY.to_string());
        self.retry_count = 0;
        self.is_offline_mode = false;
        self.finish_turn(ChatMessage::bot(text))
    }

    /// Complete a turn that ended in an error
    pub fn complete_with_error(&mut self, error: &ChatError, max_retries: u32) -> MessageId {
        if !error.counts_as_failure() {
            return self.complete_with_reply(None);
        }

        self.retry_count += 1;
        if self.retry_count >= max_retries {
            self.is_offline_mode = true;
        }
        self.finish_turn(ChatMessage::bot(error.user_message()))
    }

    /// Complete a turn answered locally
    pub fn complete_with_fallback(&mut self, text: impl Into<String>) -> MessageId {
        self.finish_turn(ChatMessage::bot(text))
    }

    /// Flip offline mode and announce the new mode
    ///
    /// The retry count is left as is.
    pub fn toggle_offline_mode(&mut self) -> MessageId {
        self.is_offline_mode = !self.is_offline_mode;
        let announcement = if self.is_offline_mode {
            OFFLINE_ANNOUNCEMENT
        } else {
            ONLINE_ANNOUNCEMENT
        };
        self.append(ChatMessage::bot(announcement))
    }

    /// Mirror the shell's draft text
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input_text = text.into();
    }

    fn finish_turn(&mut self, message: ChatMessage) -> MessageId {
        self.is_loading = false;
        self.append(message)
    }

    fn append(&mut self, message: ChatMessage) -> MessageId {
        let id = message.id.clone();
        self.messages.push(message);
        id
    }
}
