//! Client Handle
//!
//! Thin wrapper that runs the chat client beside the TUI event loop.
//!
//! # Architecture
//!
//! The TUI holds no chat policy. Its job is:
//! 1. Convert key presses to `ShellEvent`s
//! 2. Hand them to the dispatcher task without waiting
//! 3. Drain `ShellMessage`s every frame
//! 4. Render the latest snapshot
//!
//! The dispatcher handles events in order. Events that wait on the network
//! (session start, send) run on their own task so a toggle can still land
//! while a reply is in flight.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use parley_core::{ChatBackend, ChatClient, ShellEvent, ShellMessage};

/// Capacity of the shell event queue
const EVENT_QUEUE: usize = 64;

/// Handle for sending intents to the chat client and receiving its messages
pub struct ClientHandle {
    /// Intents for the dispatcher task
    events: mpsc::Sender<ShellEvent>,
    /// Messages from the client
    rx: mpsc::Receiver<ShellMessage>,
    /// Dispatcher task
    dispatcher: JoinHandle<()>,
}

impl ClientHandle {
    /// Start the dispatcher for `client`, whose messages arrive on `rx`
    pub fn spawn<B>(client: ChatClient<B>, rx: mpsc::Receiver<ShellMessage>) -> Self
    where
        B: ChatBackend + 'static,
    {
        let (events, event_rx) = mpsc::channel(EVENT_QUEUE);
        let dispatcher = tokio::spawn(dispatch_events(client, event_rx));
        Self {
            events,
            rx,
            dispatcher,
        }
    }

    /// Queue an intent; returns false if it was dropped
    pub fn dispatch(&self, event: ShellEvent) -> bool {
        match self.events.try_send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to queue shell event: {}", e);
                false
            }
        }
    }

    /// Start the chat session
    pub fn start_session(&self) -> bool {
        self.dispatch(ShellEvent::StartSession)
    }

    /// Send the user's draft
    pub fn send_message(&self, text: String) -> bool {
        self.dispatch(ShellEvent::SendMessage { text })
    }

    /// Flip offline mode
    pub fn toggle_offline_mode(&self) -> bool {
        self.dispatch(ShellEvent::ToggleOfflineMode)
    }

    /// Mirror the draft into the session
    pub fn input_changed(&self, text: &str) -> bool {
        self.dispatch(ShellEvent::InputChanged {
            text: text.to_string(),
        })
    }

    /// Receive all pending messages from the client (non-blocking)
    pub fn recv_all(&mut self) -> Vec<ShellMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Wait for the next message from the client
    pub async fn recv(&mut self) -> Option<ShellMessage> {
        self.rx.recv().await
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.dispatcher.abort();
    }
}

async fn dispatch_events<B>(client: ChatClient<B>, mut events: mpsc::Receiver<ShellEvent>)
where
    B: ChatBackend + 'static,
{
    while let Some(event) = events.recv().await {
        if event.is_network_bound() {
            let client = client.clone();
            tokio::spawn(async move { client.handle_event(event).await });
        } else {
            client.handle_event(event).await;
        }
    }
    tracing::debug!("Shell event queue closed");
}
