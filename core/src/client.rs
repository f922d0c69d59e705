//! Chat Client - The Resilience Core
//!
//! The client mediates every chat turn between the UI shell and the chat
//! backend. It owns:
//! - The session state (messages, loading, offline mode, retry count)
//! - Request timeouts and retry accounting
//! - Degradation to local fallback replies
//! - Notifications to the shell
//!
//! # Concurrency
//!
//! `ChatClient` is a cheap handle over shared state, so a shell can run a
//! send on a spawned task and still toggle offline mode or take snapshots
//! while it is in flight. Each state transition happens in one lock-scoped
//! step; the lock is never held across an `.await`. Notifications are sent
//! after the lock is released and carry a revision number so the shell can
//! drop snapshots that arrive out of order.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::backend::ChatBackend;
use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::events::ShellEvent;
use crate::fallback::FallbackResponder;
use crate::messages::{MessageId, ShellMessage};
use crate::session::{ChatSessionState, SendRoute};

/// Session state plus the revision of the last transition
#[derive(Default)]
struct Tracked {
    state: ChatSessionState,
    revision: u64,
    /// A session has been seeded and no restart is probing
    started: bool,
    /// Bumped each time a session is seeded
    generation: u64,
}

impl Tracked {
    fn bump(&mut self) -> (u64, ChatSessionState) {
        self.revision += 1;
        (self.revision, self.state.clone())
    }
}

struct Inner<B> {
    backend: B,
    config: ClientConfig,
    fallback: FallbackResponder,
    tracked: Mutex<Tracked>,
    tx: mpsc::Sender<ShellMessage>,
}

/// Resilient chat client
pub struct ChatClient<B: ChatBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: ChatBackend> Clone for ChatClient<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: ChatBackend> ChatClient<B> {
    /// Create a client; the session is empty until [`start_session`](Self::start_session)
    pub fn new(backend: B, config: ClientConfig, tx: mpsc::Sender<ShellMessage>) -> Self {
        let fallback = FallbackResponder::new(config.fallback_responses.clone());
        Self {
            inner: Arc::new(Inner {
                backend,
                config,
                fallback,
                tracked: Mutex::new(Tracked::default()),
                tx,
            }),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The backend this client talks to
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Consistent copy of the current session
    pub fn snapshot(&self) -> ChatSessionState {
        self.inner.tracked.lock().state.clone()
    }

    /// Start a fresh session
    ///
    /// Probes the backend once (unless configured to start offline) and seeds
    /// offline mode from the result. Any previous session is replaced, and a
    /// reply still in flight for it is dropped. Sends and toggles are ignored
    /// until the new session is seeded.
    /// Returns whether the session starts offline.
    pub async fn start_session(&self) -> bool {
        let config = &self.inner.config;
        // Intents are ignored until the new session is seeded
        self.inner.tracked.lock().started = false;

        let reachable = if config.start_offline {
            false
        } else {
            tokio::time::timeout(config.probe_timeout, self.inner.backend.probe())
                .await
                .unwrap_or(false)
        };

        tracing::debug!(
            backend = self.inner.backend.name(),
            reachable,
            "Session starting"
        );

        let (revision, snapshot, greeting_id) = {
            let mut tracked = self.inner.tracked.lock();
            tracked.state = ChatSessionState::new(&config.greeting, !reachable);
            tracked.started = true;
            tracked.generation += 1;
            let greeting_id = tracked.state.last_message().map(|m| m.id.clone());
            let (revision, snapshot) = tracked.bump();
            (revision, snapshot, greeting_id)
        };

        self.publish(revision, snapshot, greeting_id).await;
        !reachable
    }

    /// Send the user's text
    ///
    /// Blank text, a send before the session has started, or a send while
    /// another turn is loading, is ignored.
    /// Otherwise the turn is answered by the backend or, when offline or out
    /// of retries, by a local fallback after a short delay. Failures are
    /// reported as bot messages; nothing is re-sent automatically.
    pub async fn send_message(&self, raw_text: &str) {
        let config = &self.inner.config;

        let (pending, generation, revision, snapshot) = {
            let mut tracked = self.inner.tracked.lock();
            if !tracked.started {
                tracing::debug!("Ignoring send: session not started");
                return;
            }
            match tracked.state.begin_send(raw_text, config.max_retries) {
                Some(pending) => {
                    let generation = tracked.generation;
                    let (revision, snapshot) = tracked.bump();
                    (pending, generation, revision, snapshot)
                }
                None => {
                    tracing::debug!(
                        loading = tracked.state.is_loading,
                        "Ignoring send: blank input or turn in flight"
                    );
                    return;
                }
            }
        };
        self.publish(revision, snapshot, Some(pending.message_id))
            .await;

        let (revision, snapshot, reply_id) = match pending.route {
            SendRoute::Fallback => {
                if !config.fallback_delay.is_zero() {
                    tokio::time::sleep(config.fallback_delay).await;
                }
                let text = self.inner.fallback.pick();

                let mut tracked = self.inner.tracked.lock();
                if tracked.generation != generation {
                    tracing::debug!("Dropping fallback reply for a replaced session");
                    return;
                }
                let reply_id = tracked.state.complete_with_fallback(text);
                let (revision, snapshot) = tracked.bump();
                (revision, snapshot, reply_id)
            }
            SendRoute::Network => {
                let outcome = match tokio::time::timeout(
                    config.request_timeout,
                    self.inner.backend.send(raw_text),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(ChatError::Timeout),
                };

                let mut tracked = self.inner.tracked.lock();
                if tracked.generation != generation {
                    tracing::debug!(
                        backend = self.inner.backend.name(),
                        "Dropping reply for a replaced session"
                    );
                    return;
                }
                let was_offline = tracked.state.is_offline_mode;
                let reply_id = match outcome {
                    Ok(reply) => tracked.state.complete_with_reply(reply.response),
                    Err(e) => {
                        let id = tracked.state.complete_with_error(&e, config.max_retries);
                        tracing::warn!(
                            backend = self.inner.backend.name(),
                            error = %e,
                            retry_count = tracked.state.retry_count,
                            "Chat turn failed"
                        );
                        id
                    }
                };
                let now_offline = tracked.state.is_offline_mode;
                if was_offline != now_offline {
                    tracing::info!(offline = now_offline, "Offline mode changed after chat turn");
                }
                let (revision, snapshot) = tracked.bump();
                (revision, snapshot, reply_id)
            }
        };

        self.publish(revision, snapshot, Some(reply_id)).await;
    }

    /// Flip offline mode and announce it
    ///
    /// Does not cancel an in-flight request; a later success still clears
    /// offline mode. Ignored until the session has started.
    pub async fn toggle_offline_mode(&self) {
        let (revision, snapshot, id, offline) = {
            let mut tracked = self.inner.tracked.lock();
            if !tracked.started {
                tracing::debug!("Ignoring toggle: session not started");
                return;
            }
            let id = tracked.state.toggle_offline_mode();
            let offline = tracked.state.is_offline_mode;
            let (revision, snapshot) = tracked.bump();
            (revision, snapshot, id, offline)
        };
        tracing::info!(offline, "Offline mode toggled by user");
        self.publish(revision, snapshot, Some(id)).await;
    }

    /// Mirror the shell's draft text into the session
    pub async fn set_pending_input(&self, text: impl Into<String>) {
        let (revision, snapshot) = {
            let mut tracked = self.inner.tracked.lock();
            tracked.state.set_pending_input(text);
            tracked.bump()
        };
        self.publish(revision, snapshot, None).await;
    }

    /// Whether a session has been seeded and is accepting intents
    pub fn is_started(&self) -> bool {
        self.inner.tracked.lock().started
    }

    /// Handle an event from the shell
    pub async fn handle_event(&self, event: ShellEvent) {
        match event {
            ShellEvent::StartSession => {
                self.start_session().await;
            }
            ShellEvent::SendMessage { text } => self.send_message(&text).await,
            ShellEvent::ToggleOfflineMode => self.toggle_offline_mode().await,
            ShellEvent::InputChanged { text } => self.set_pending_input(text).await,
        }
    }

    /// Push a snapshot to the shell, then scroll if something was appended
    async fn publish(&self, revision: u64, snapshot: ChatSessionState, appended: Option<MessageId>) {
        self.send(ShellMessage::StateChanged { revision, snapshot })
            .await;
        if let Some(message_id) = appended {
            self.send(ShellMessage::ScrollToLatest { message_id }).await;
        }
    }

    /// Send a message to the shell
    async fn send(&self, msg: ShellMessage) {
        if let Err(e) = self.inner.tx.send(msg).await {
            tracing::warn!("Failed to send message to shell: {}", e);
        }
    }
}
