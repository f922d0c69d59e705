//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - ClientHandle for the chat client
//! - DisplayState for rendering
//!
//! The App converts key presses to shell events, queues them without
//! waiting, drains client messages every frame and renders the latest
//! snapshot.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::client_handle::ClientHandle;
use crate::display::DisplayState;
use crate::input::InputBuffer;
use crate::ui;

/// Lines scrolled per PgUp/PgDn when the viewport size is unknown
const DEFAULT_PAGE: usize = 5;

/// Quick goodbye messages (instant, no network)
const QUICK_GOODBYES: &[&str] = &[
    "Görüşmek üzere!",
    "Kolay gelsin!",
    "Hoşça kal!",
    "Projende başarılar!",
    "İyi çalışmalar!",
    "Planın hazır olsun!",
];

/// Which screen is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Conversation and input
    Chat,
    /// About the assistant
    Info,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,

    // === Client Integration ===
    /// Handle for the chat client
    client: ClientHandle,
    /// Display state derived from client messages
    pub(crate) display: DisplayState,

    // === UI State ===
    /// Screen currently shown
    pub(crate) screen: Screen,
    /// User draft
    pub(crate) input: InputBuffer,
    /// Scroll offset (lines from bottom, 0 = latest)
    pub(crate) scroll_offset: usize,
    /// Total rendered conversation lines (for scroll bounds)
    pub(crate) total_lines: usize,
    /// Height of the conversation viewport in the last frame
    pub(crate) viewport_height: usize,
    /// Frames drawn, drives the loading spinner
    pub(crate) tick: u64,
}

impl App {
    /// Create a new App around a running client
    pub fn new(client: ClientHandle, max_input_chars: usize) -> Self {
        Self {
            running: true,
            goodbye_message: None,
            client,
            display: DisplayState::new(),
            screen: Screen::Chat,
            input: InputBuffer::new(max_input_chars),
            scroll_offset: 0,
            total_lines: 0,
            viewport_height: 0,
            tick: 0,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~30 FPS is plenty for a chat view
        let frame_duration = Duration::from_millis(33);

        // Async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        self.client.start_session();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| ui::render(frame, self))?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key)
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            self.process_client_messages();
            self.tick = self.tick.wrapping_add(1);

            terminal.draw(|frame| ui::render(frame, self))?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Apply all pending messages from the client
    fn process_client_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.display.apply_message(msg);
        }
        if self.display.take_scroll_request() {
            self.scroll_offset = 0;
        }
    }

    /// Handle keyboard input
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.screen == Screen::Info {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q')) {
                self.screen = Screen::Chat;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit(),

            KeyCode::F(1) => self.screen = Screen::Info,

            KeyCode::F(2) => self.toggle_offline_mode(),
            KeyCode::Char('o') if ctrl => self.toggle_offline_mode(),

            KeyCode::Enter => self.submit(),

            // Typing
            KeyCode::Char(c) if !ctrl => {
                if self.input.push(c) {
                    self.client.input_changed(self.input.text());
                }
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.client.input_changed(self.input.text());
                }
            }

            // Conversation scrolling
            KeyCode::PageUp => {
                let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
                self.scroll_offset = (self.scroll_offset + self.page_size()).min(max_scroll);
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(self.page_size());
            }
            KeyCode::Home if ctrl => {
                self.scroll_offset = self.total_lines.saturating_sub(self.viewport_height);
            }
            KeyCode::End if ctrl => {
                self.scroll_offset = 0;
            }

            _ => {}
        }
    }

    /// Send the draft unless it is blank, a reply is pending, or the
    /// session has not started yet (the draft is kept)
    fn submit(&mut self) {
        if self.input.is_blank() || self.display.is_loading() || !self.display.is_ready() {
            return;
        }
        let text = self.input.take();
        self.client.send_message(text);
        self.scroll_offset = 0;
    }

    fn toggle_offline_mode(&mut self) {
        if self.display.is_ready() {
            self.client.toggle_offline_mode();
        }
    }

    fn page_size(&self) -> usize {
        if self.viewport_height > 1 {
            self.viewport_height / 2
        } else {
            DEFAULT_PAGE
        }
    }

    fn quit(&mut self) {
        self.generate_goodbye();
        self.running = false;
    }

    /// Whether the event loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Screen currently shown
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Generate a quick goodbye message
    fn generate_goodbye(&mut self) {
        let idx = rand::random::<usize>() % QUICK_GOODBYES.len();
        self.goodbye_message = Some(QUICK_GOODBYES[idx].to_string());
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use parley_core::{
        BackendReply, ChatBackend, ChatClient, ChatError, ChatMessage, ClientConfig,
    };

    struct QuietBackend;

    #[async_trait::async_trait]
    impl ChatBackend for QuietBackend {
        fn name(&self) -> &str {
            "Quiet"
        }

        async fn probe(&self) -> bool {
            true
        }

        async fn send(&self, _message: &str) -> Result<BackendReply, ChatError> {
            Ok(BackendReply::text("tamam"))
        }
    }

    fn app(max_input_chars: usize) -> App {
        let (tx, rx) = mpsc::channel(100);
        let client = ChatClient::new(QuietBackend, ClientConfig::default(), tx);
        App::new(ClientHandle::spawn(client, rx), max_input_chars)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_typing_stops_at_limit() {
        let mut app = app(5);

        type_text(&mut app, "merhaba");

        assert_eq!(app.input.text(), "merha");
    }

    #[tokio::test]
    async fn test_enter_ignores_blank_draft() {
        let mut app = app(500);
        type_text(&mut app, "   ");

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input.text(), "   ");
    }

    #[tokio::test]
    async fn test_enter_ignored_while_loading() {
        let mut app = app(500);
        app.display.session.messages.push(ChatMessage::bot("Merhaba"));
        app.display.session.is_loading = true;
        type_text(&mut app, "selam");

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input.text(), "selam");
    }

    #[tokio::test]
    async fn test_enter_held_until_session_ready() {
        let mut app = app(500);
        type_text(&mut app, "selam");

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input.text(), "selam");
    }

    #[tokio::test]
    async fn test_enter_sends_and_clears() {
        let mut app = app(500);
        app.display.session.messages.push(ChatMessage::bot("Merhaba"));
        type_text(&mut app, "selam");
        app.scroll_offset = 4;

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input.text(), "");
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_info_screen_round_trip() {
        let mut app = app(500);

        press(&mut app, KeyCode::F(1));
        assert_eq!(app.screen(), Screen::Info);

        // Typing on the info screen does not reach the draft
        type_text(&mut app, "x");
        assert_eq!(app.input.text(), "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Chat);
        assert!(app.is_running());
    }

    #[tokio::test]
    async fn test_escape_quits_with_goodbye() {
        let mut app = app(500);

        press(&mut app, KeyCode::Esc);

        assert!(!app.is_running());
        let goodbye = app.goodbye().unwrap();
        assert!(QUICK_GOODBYES.contains(&goodbye));
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_info() {
        let mut app = app(500);
        press(&mut app, KeyCode::F(1));

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(!app.is_running());
    }

    #[tokio::test]
    async fn test_scroll_is_bounded() {
        let mut app = app(500);
        app.total_lines = 30;
        app.viewport_height = 10;

        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll_offset, 15);

        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll_offset, 20);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll_offset, 15);
    }
}
