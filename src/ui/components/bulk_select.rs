//! Bulk-select popover.
//!
//! A small overlay asking how many rows of the current page to select.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::input::NumberInput;
use crate::ui::theme::theme;

/// Action returned from the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkSelectAction {
    /// The user submitted; carries the entered count, if any.
    Submit(Option<usize>),
    /// The user dismissed the popover without submitting.
    Cancel,
}

/// Popover holding the "rows to select" input.
///
/// The typed value survives closing and reopening the popover.
#[derive(Debug, Clone)]
pub struct BulkSelectPopup {
    input: NumberInput,
    visible: bool,
}

impl Default for BulkSelectPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkSelectPopup {
    /// Create a hidden popover.
    pub fn new() -> Self {
        Self {
            input: NumberInput::new().with_placeholder("Enter rows to select"),
            visible: false,
        }
    }

    /// Show the popover, bounding input by the rows on the current page.
    pub fn show(&mut self, rows_on_page: usize) {
        self.input.set_max(Some(rows_on_page));
        self.visible = true;
    }

    /// Hide the popover.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the popover is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The pending row count, clamped to the current page.
    pub fn rows_to_select(&self) -> Option<usize> {
        self.input.number()
    }

    /// Handle keyboard input while visible.
    ///
    /// Enter submits, Esc cancels; both hide the popover. Everything else
    /// goes to the number field.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<BulkSelectAction> {
        match key.code {
            KeyCode::Enter => {
                self.visible = false;
                Some(BulkSelectAction::Submit(self.input.number()))
            }
            KeyCode::Esc => {
                self.visible = false;
                Some(BulkSelectAction::Cancel)
            }
            _ => {
                self.input.handle_input(key);
                None
            }
        }
    }

    /// Render the popover centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let t = theme();
        let dialog_area = centered_rect(area, 34, 6);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                " Select Rows ",
                t.accent_style().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(t.accent_style());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let input_area = Rect {
            height: 3.min(inner.height),
            ..inner
        };
        self.input.render(frame, input_area, true);

        if inner.height > 3 {
            let hint_area = Rect {
                y: inner.y + 3,
                height: 1,
                ..inner
            };
            let hint = Paragraph::new(Span::styled("Enter:submit  Esc:cancel", t.muted_style()))
                .alignment(Alignment::Center);
            frame.render_widget(hint, hint_area);
        }
    }
}

/// A rectangle of at most `width` x `height`, centered in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
