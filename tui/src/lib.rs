//! Parley TUI - Terminal shell for the parley chat client
//!
//! A full-screen chat view over the headless `parley-core` client.
//!
//! # Architecture
//!
//! - **App**: Event loop, key handling, scroll state
//! - **ClientHandle**: Runs the chat client beside the event loop
//! - **Display**: Latest session snapshot from the client
//! - **Input**: Length-limited draft
//! - **UI**: Chat and info screen rendering

pub mod app;
pub mod client_handle;
pub mod display;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::App;
pub use client_handle::ClientHandle;
