//! Numeric input component.
//!
//! A single-line field that only accepts ASCII digits, with:
//! - Cursor movement (left/right, home/end)
//! - Backspace/delete and Ctrl+U to clear
//! - Placeholder text when empty
//! - An optional upper bound applied when the value is read

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Longest accepted input; keeps the value inside `usize` everywhere.
const MAX_DIGITS: usize = 9;

/// A digits-only text input widget.
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
    /// The raw digits typed so far.
    value: String,
    /// Cursor position within the value.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
    /// Upper bound applied by `number()`.
    max: Option<usize>,
}

impl NumberInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the upper bound applied to the parsed number.
    pub fn set_max(&mut self, max: Option<usize>) {
        self.max = max;
    }

    /// Get the raw text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The entered number, clamped to the upper bound.
    ///
    /// `None` when nothing was entered. Zero is returned as zero; deciding
    /// what a non-positive count means is the caller's business.
    pub fn number(&self) -> Option<usize> {
        let n: usize = self.value.parse().ok()?;
        Some(match self.max {
            Some(max) => n.min(max),
            None => n,
        })
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if c.is_ascii_digit() && self.value.len() < MAX_DIGITS {
                    self.value.insert(self.cursor, c);
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            _ => false,
        }
    }

    /// Render the input field with a border, placing the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let (text, style) = if self.is_empty() {
            (self.placeholder.as_str(), t.muted_style())
        } else {
            (self.value(), Style::default())
        };
        let border_style = if focused {
            t.accent_style()
        } else {
            t.muted_style()
        };

        let input = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(input, area);

        if focused {
            frame.set_cursor_position(Position {
                x: area.x + 1 + self.cursor() as u16,
                y: area.y + 1,
            });
        }
    }
}
