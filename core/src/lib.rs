//! Parley Core - Headless Resilient Chat Client
//!
//! This crate holds the client-side chat logic, independent of any UI. It
//! decides how each chat turn is answered: by the backend, by an error
//! message when the backend fails, or by a local fallback reply once the
//! client has gone offline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  UI Shell                     │
//! │        (terminal app, tests, headless)        │
//! └───────────────┬──────────────────▲────────────┘
//!                 │ ShellEvent (up)  │ ShellMessage (down)
//! ┌───────────────▼──────────────────┴────────────┐
//! │                 ChatClient                     │
//! │  ┌──────────────┐ ┌────────────┐ ┌──────────┐ │
//! │  │ Session      │ │ Fallback   │ │ Backend  │ │
//! │  │ State        │ │ Responder  │ │ (HTTP)   │ │
//! │  └──────────────┘ └────────────┘ └──────────┘ │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatClient`]: Applies timeout, retry and offline policy to every turn
//! - [`ChatSessionState`]: Messages and routing flags for one session
//! - [`ShellMessage`]: Messages sent from the client to the shell
//! - [`ShellEvent`]: Intents sent from the shell to the client
//! - [`ChatBackend`]: Whatever answers chat messages
//!
//! # Quick Start
//!
//! ```ignore
//! use parley_core::{ChatClient, ClientConfig, HttpBackend};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let config = ClientConfig::from_env();
//!     let backend = HttpBackend::from_config(&config)?;
//!     let client = ChatClient::new(backend, config, tx);
//!
//!     client.start_session().await;
//!     client.send_message("Merhaba").await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod fallback;
pub mod messages;
pub mod session;

pub use backend::{BackendReply, ChatBackend, DemoLlmBackend, HttpBackend};
pub use client::ChatClient;
pub use config::{BackendKind, ClientConfig, ConfigError, ConfigOverrides, ConfigSource};
pub use error::ChatError;
pub use events::ShellEvent;
pub use fallback::FallbackResponder;
pub use messages::{MessageId, Sender, ShellMessage};
pub use session::{ChatMessage, ChatSessionState};
