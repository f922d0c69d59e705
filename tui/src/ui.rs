//! Rendering
//!
//! Draws the chat and info screens from the App's display state. Nothing
//! here changes session state; the only App fields written are the scroll
//! bounds measured during layout.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use parley_core::ChatMessage;

use crate::app::{App, Screen};
use crate::display::{is_from_user, message_prefix};
use crate::theme::{
    banner_style, dim_style, header_style, ONLINE_GREEN, OFFLINE_RED, PRIMARY, USER_GREEN,
    WARN_YELLOW,
};

const TITLE: &str = "Proje Planlama";
const OFFLINE_BANNER: &str = "Çevrimdışı Mod - Sınırlı işlevsellik";
const LOADING_TEXT: &str = "Yanıt bekleniyor...";
const PLACEHOLDER: &str = "Mesajınızı yazın...";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INFO_LINES: &[&str] = &[
    "Yapay zeka destekli proje planlama çözümü",
    "",
    "Proje Planlama Asistanı, projelerinizin planlanması ve yönetiminde size yardımcı olmak \
     için tasarlanmış yapay zeka destekli bir chatbot uygulamasıdır. Karmaşık projeleri daha \
     kolay yönetebilmeniz için akıllı öneriler sunar.",
    "",
    "Nasıl kullanılır",
    "  1. Sohbet ekranında projeniz hakkında sorular sorun.",
    "  2. Projenizin kapsamı, zaman çizelgesi ve kaynak ihtiyaçları hakkında bilgi verin.",
    "  3. Asistandan çeşitli proje yönetimi önerileri ve planlamaları alın.",
    "",
    "Bağlantı yoksa",
    "  Sunucuya ulaşılamadığında asistan çevrimdışı moda geçer ve basit yanıtlar verir.",
    "  Ctrl+O ile modu istediğiniz zaman değiştirebilirsiniz.",
];

/// Draw the current screen
pub fn render(frame: &mut Frame, app: &mut App) {
    render_chat(frame, app);
    if app.screen == Screen::Info {
        render_info(frame);
    }
}

fn render_chat(frame: &mut Frame, app: &mut App) {
    let offline = app.display.is_offline();
    let loading = app.display.is_loading();

    let [header_area, banner_area, conversation_area, loading_area, input_area, status_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(u16::from(offline)),
            Constraint::Min(3),
            Constraint::Length(u16::from(loading)),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(frame, header_area, offline);
    if offline {
        frame.render_widget(
            Paragraph::new(OFFLINE_BANNER)
                .style(banner_style())
                .alignment(Alignment::Center),
            banner_area,
        );
    }
    render_conversation(frame, app, conversation_area);
    if loading {
        let spinner = SPINNER[(app.tick as usize / 3) % SPINNER.len()];
        frame.render_widget(
            Paragraph::new(format!(" {spinner} {LOADING_TEXT}")).style(dim_style()),
            loading_area,
        );
    }
    render_input(frame, app, input_area);
    render_status(frame, app, status_area);
}

fn render_header(frame: &mut Frame, area: Rect, offline: bool) {
    let (label, color) = if offline {
        ("○ Çevrimdışı ", OFFLINE_RED)
    } else {
        ("● Çevrimiçi ", ONLINE_GREEN)
    };
    let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
    let [title_area, mode_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {TITLE}"), header_style())),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(color))),
        mode_area,
    );
}

/// Wrap every message into display lines
///
/// User messages are right-aligned, assistant messages left-aligned, and a
/// blank line separates turns.
pub fn conversation_lines(messages: &[ChatMessage], width: usize) -> Vec<Line<'static>> {
    let width = width.max(10);
    let mut lines = Vec::new();

    for message in messages {
        let from_user = is_from_user(message);
        let (prefix_style, text_style) = if from_user {
            (
                Style::default().fg(USER_GREEN).add_modifier(Modifier::BOLD),
                Style::default().fg(USER_GREEN),
            )
        } else {
            (
                Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Reset),
            )
        };
        let alignment = if from_user {
            Alignment::Right
        } else {
            Alignment::Left
        };

        let prefix = message_prefix(message);
        let content = format!("{prefix}{}", message.text);
        for (i, wrapped) in textwrap::wrap(&content, width).into_iter().enumerate() {
            let line = if i == 0 && wrapped.starts_with(&prefix) {
                let rest = wrapped[prefix.len()..].to_string();
                Line::from(vec![
                    Span::styled(prefix.clone(), prefix_style),
                    Span::styled(rest, text_style),
                ])
            } else {
                Line::from(Span::styled(wrapped.into_owned(), text_style))
            };
            lines.push(line.alignment(alignment));
        }
        lines.push(Line::default());
    }

    lines
}

fn render_conversation(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let height = area.height as usize;
    let lines = conversation_lines(app.display.messages(), width);

    app.total_lines = lines.len();
    app.viewport_height = height;

    // Clamp scroll offset
    let max_scroll = app.total_lines.saturating_sub(height);
    if app.scroll_offset > max_scroll {
        app.scroll_offset = max_scroll;
    }
    let first_visible = max_scroll - app.scroll_offset;
    let first_visible = u16::try_from(first_visible).unwrap_or(u16::MAX);

    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    frame.render_widget(Paragraph::new(lines).scroll((first_visible, 0)), inner);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let counter_style = if app.input.near_limit() {
        Style::default().fg(WARN_YELLOW)
    } else {
        dim_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title_top(Line::from(Span::styled(app.input.counter(), counter_style)).right_aligned());

    let paragraph = if app.input.text().is_empty() {
        Paragraph::new(Span::styled(PLACEHOLDER, dim_style()))
    } else {
        // Show the tail of the draft that fits, with a cursor
        let visible = area.width.saturating_sub(3) as usize;
        let chars: Vec<char> = app.input.text().chars().collect();
        let start = chars.len().saturating_sub(visible);
        let tail: String = chars[start..].iter().collect();
        Paragraph::new(Span::styled(format!("{tail}_"), Style::default().fg(USER_GREEN)))
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let scroll_info = if app.scroll_offset > 0 {
        format!(" [^{} satır]", app.scroll_offset)
    } else {
        String::new()
    };
    let status = format!(
        " Enter gönder | Ctrl+O mod | F1 bilgi | PgUp/PgDn kaydır | Esc çıkış{scroll_info}"
    );
    frame.render_widget(Paragraph::new(status).style(dim_style()), area);
}

fn render_info(frame: &mut Frame) {
    let area = centered(frame.area(), 80, 80);
    let lines: Vec<Line> = INFO_LINES
        .iter()
        .map(|l| {
            if l.starts_with(' ') || l.is_empty() {
                Line::from(*l)
            } else {
                Line::from(Span::styled(*l, header_style()))
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title(" Proje Planlama Asistanı ")
        .title_bottom(Line::from(" Esc geri ").right_aligned());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Rect covering `percent_x` by `percent_y` of `area`, centered
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
