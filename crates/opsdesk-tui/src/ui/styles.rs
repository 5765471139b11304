//! Colors and text styles for the opsdesk shell.
//!
//! Render code asks for styles by role (heading, hint, cursor) rather than
//! by color, so the palette can change in one place.

use ratatui::style::{Color, Modifier, Style};

// Palette
const BRAND: Color = Color::Rgb(38, 166, 154);
const AMBER: Color = Color::Rgb(230, 180, 80);
const GREEN: Color = Color::Rgb(120, 190, 110);
const RED: Color = Color::Rgb(220, 90, 90);
const SLATE: Color = Color::Rgb(112, 120, 130);
const TEXT: Color = Color::Rgb(220, 224, 228);
const CURSOR_BG: Color = Color::Rgb(36, 52, 60);
const BAR_BG: Color = Color::Rgb(24, 30, 36);

pub fn heading() -> Style {
    Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn dim() -> Style {
    Style::default().fg(SLATE)
}

/// Section labels and in-progress notices.
pub fn accent() -> Style {
    Style::default().fg(AMBER)
}

pub fn good() -> Style {
    Style::default().fg(GREEN)
}

pub fn bad() -> Style {
    Style::default().fg(RED)
}

/// Form fields and buttons; the focused one sits on the cursor band.
pub fn cursor(focused: bool) -> Style {
    if focused {
        text().bg(CURSOR_BG).add_modifier(Modifier::BOLD)
    } else {
        text()
    }
}

/// Selected table row. Unfocused tables keep no visible cursor.
pub fn table_cursor(focused: bool) -> Style {
    if focused {
        cursor(true)
    } else {
        Style::default()
    }
}

/// Menu entry; the current route is underlined.
pub fn nav_entry(selected: bool, current: bool) -> Style {
    let style = cursor(selected);
    if current {
        style.fg(BRAND).add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

pub fn frame_border(focused: bool) -> Style {
    Style::default().fg(if focused { BRAND } else { SLATE })
}

pub fn status_bar() -> Style {
    Style::default().bg(BAR_BG).fg(TEXT)
}

/// Key name in a shortcut hint, e.g. the `q` in `[q] quit`.
pub fn key_hint() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn key_label() -> Style {
    text()
}
