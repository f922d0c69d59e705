//! Chat Backend Integration
//!
//! Abstracted access to the service that answers chat messages.
//!
//! # Available Backends
//!
//! - **HTTP**: JSON over HTTP, `POST {"message": ...}` answered with
//!   `{"response": ...}`
//! - **DemoLLM**: public demo completion service, `POST {"messages": [...]}`
//!   answered with `{"completion": ...}`
//!
//! # Usage
//!
//! ```ignore
//! use parley_core::backend::{ChatBackend, HttpBackend};
//!
//! let backend = HttpBackend::new("http://localhost:3000/api/chat")?;
//! let reply = backend.send("Merhaba").await?;
//! ```

mod demo;
mod http;
mod traits;

pub use demo::{DemoLlmBackend, DEFAULT_DEMO_ENDPOINT, DEMO_SYSTEM_PROMPT, NO_COMPLETION_REPLY};
pub use http::{build_http_client, origin_url, probe_connectivity, HttpBackend};
pub use traits::{BackendReply, ChatBackend};
