//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Accent color for titles, borders of focused widgets, spinners.
    pub accent: Color,
    /// Color for secondary text and inactive borders.
    pub muted: Color,
    /// Color for selected checkboxes.
    pub selected: Color,
    /// Background of the cursor row.
    pub cursor_bg: Color,
    /// Color for table headers.
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selected: Color::Green,
            cursor_bg: Color::DarkGray,
            header: Color::Yellow,
        }
    }
}

impl Theme {
    /// Style for table header cells.
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    /// Style for the row under the cursor.
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dimmed text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for titles and accents.
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

/// The active theme.
pub fn theme() -> Theme {
    Theme::default()
}
