//! Theme and Colors
//!
//! Parley's palette: an indigo accent for the assistant and chrome, green
//! for the user, and a warning red reserved for the offline banner.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Brand Colors
// ============================================================================

/// Primary accent - indigo
pub const PRIMARY: Color = Color::Rgb(94, 114, 228);

/// Offline banner background - warning red
pub const OFFLINE_RED: Color = Color::Rgb(244, 67, 54);

/// Online indicator
pub const ONLINE_GREEN: Color = Color::Rgb(120, 230, 120);

// ============================================================================
// Text Colors
// ============================================================================

/// User message text
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Timestamps, hints and other secondary text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Input counter once the draft is near the limit
pub const WARN_YELLOW: Color = Color::Rgb(255, 223, 128);

// ============================================================================
// Composite Styles
// ============================================================================

/// Header title
pub fn header_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Offline banner
pub fn banner_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(OFFLINE_RED)
        .add_modifier(Modifier::BOLD)
}

/// Secondary text
pub fn dim_style() -> Style {
    Style::default().fg(DIM_GRAY)
}
