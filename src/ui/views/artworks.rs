//! Artworks table view.
//!
//! Shows one page of artworks with a selection checkbox per row. Paging is
//! lazy: the view only records which page it is on and tells the host when
//! that changes; the host fetches and hands the rows back.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::debug;

use crate::api::types::Artwork;
use crate::selection::SelectionMap;
use crate::ui::components::{BulkSelectAction, BulkSelectPopup, PageEvent, Paginator};
use crate::ui::theme::theme;

/// Column headers after the checkbox column. Rows keep server order; there is
/// no column sort.
const COLUMNS: [&str; 6] = [
    "Title",
    "Place of Origin",
    "Artist",
    "Inscriptions",
    "Date Start",
    "Date End",
];

/// Actions the host must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworksAction {
    /// The 1-based page number changed; the host should fetch it.
    PageChanged(u32),
    /// Bulk select marked this many rows.
    RowsSelected(usize),
    /// Bulk select was submitted without a positive count.
    BulkSelectSkipped,
    /// All selections were forgotten.
    SelectionCleared,
}

/// The artworks table view.
pub struct ArtworksView {
    /// Rows of the current page.
    artworks: Vec<Artwork>,
    /// The 1-based page number.
    page: u32,
    /// Whether a fetch for `page` is in flight.
    loading: bool,
    /// Selections across all pages.
    selection: SelectionMap,
    /// Paging controls.
    paginator: Paginator,
    /// "Select first N rows" popover.
    bulk_popup: BulkSelectPopup,
    /// Cursor row for ratatui.
    table_state: TableState,
}

impl Default for ArtworksView {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtworksView {
    /// Create a new view on page 1 with no rows.
    pub fn new() -> Self {
        Self {
            artworks: Vec::new(),
            page: 1,
            loading: false,
            selection: SelectionMap::new(),
            paginator: Paginator::default(),
            bulk_popup: BulkSelectPopup::new(),
            table_state: TableState::default(),
        }
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    /// The 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    pub fn rows_per_page(&self) -> u32 {
        self.paginator.rows()
    }

    /// Total records reported by the last successful fetch.
    pub fn total_records(&self) -> u64 {
        self.paginator.total_records()
    }

    /// The rows of the current page.
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Check if a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// The selection map.
    pub fn selection(&self) -> &SelectionMap {
        &self.selection
    }

    /// Check if the bulk-select popover is open.
    pub fn is_bulk_select_open(&self) -> bool {
        self.bulk_popup.is_visible()
    }

    /// The pending bulk-select count.
    pub fn rows_to_select(&self) -> Option<usize> {
        self.bulk_popup.rows_to_select()
    }

    /// Index of the cursor row.
    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Replace the rows and the total with a freshly fetched page.
    pub fn set_page_data(&mut self, artworks: Vec<Artwork>, total_records: u64) {
        self.artworks = artworks;
        self.paginator.set_total_records(total_records);
        self.table_state.select(if self.artworks.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    // ========================================================================
    // Table operations
    // ========================================================================

    /// Handle a page change from the paginator.
    ///
    /// Translates the zero-based index to a 1-based page number. Returns the
    /// new page number if it differs from the current one.
    pub fn on_page_change(&mut self, event: PageEvent) -> Option<u32> {
        let page = event.page + 1;
        if page == self.page {
            return None;
        }

        debug!(page, first = event.first, "Page changed");
        self.page = page;
        self.paginator.set_page_number(page);
        Some(page)
    }

    /// Apply the selection set the table reports for the visible page.
    pub fn on_selection_change(&mut self, selected_ids: &HashSet<u64>) {
        self.selection
            .apply_page_selection(&self.artworks, selected_ids);
    }

    /// The selected rows of the current page.
    pub fn selected_rows(&self) -> Vec<&Artwork> {
        self.selection.selected_rows(&self.artworks)
    }

    /// Mark the first `count` rows of the current page as selected and
    /// close the popover.
    ///
    /// An absent or zero count changes nothing. Returns the number of rows
    /// marked, if any marking happened.
    pub fn bulk_select(&mut self, count: Option<usize>) -> Option<usize> {
        self.bulk_popup.hide();
        match count {
            Some(n) if n > 0 => {
                let n = n.min(self.artworks.len());
                Some(self.selection.select_first(&self.artworks, n))
            }
            _ => None,
        }
    }

    /// Forget all selections on every page.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Toggle the row under the cursor.
    fn toggle_cursor_row(&mut self) {
        let Some(artwork) = self.cursor().and_then(|i| self.artworks.get(i)) else {
            return;
        };
        let id = artwork.id;

        let mut selected = self.selection.selected_ids_on(&self.artworks);
        if !selected.remove(&id) {
            selected.insert(id);
        }
        self.on_selection_change(&selected);
    }

    /// Select every row on the page, or deselect them all if they already are.
    fn toggle_page(&mut self) {
        let selected = if self.all_on_page_selected() {
            HashSet::new()
        } else {
            self.artworks.iter().map(|a| a.id).collect()
        };
        self.on_selection_change(&selected);
    }

    fn all_on_page_selected(&self) -> bool {
        !self.artworks.is_empty() && self.artworks.iter().all(|a| self.selection.is_selected(a.id))
    }

    fn move_down(&mut self) {
        if self.artworks.is_empty() {
            return;
        }
        let next = self
            .cursor()
            .map_or(0, |i| (i + 1).min(self.artworks.len() - 1));
        self.table_state.select(Some(next));
    }

    fn move_up(&mut self) {
        if self.artworks.is_empty() {
            return;
        }
        let prev = self.cursor().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    fn navigate(&mut self, event: Option<PageEvent>) -> Option<ArtworksAction> {
        event
            .and_then(|e| self.on_page_change(e))
            .map(ArtworksAction::PageChanged)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle keyboard input.
    ///
    /// Returns an action when the host needs to do something.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ArtworksAction> {
        if self.bulk_popup.is_visible() {
            return match self.bulk_popup.handle_input(key)? {
                BulkSelectAction::Submit(count) => Some(match self.bulk_select(count) {
                    Some(n) => ArtworksAction::RowsSelected(n),
                    None => ArtworksAction::BulkSelectSkipped,
                }),
                BulkSelectAction::Cancel => None,
            };
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char(' '), _) => {
                self.toggle_cursor_row();
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.toggle_page();
                None
            }
            (KeyCode::Char('n' | 'l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                let event = self.paginator.next();
                self.navigate(event)
            }
            (KeyCode::Char('p' | 'h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                let event = self.paginator.prev();
                self.navigate(event)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                let event = self.paginator.first_page();
                self.navigate(event)
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                let event = self.paginator.last_page();
                self.navigate(event)
            }
            (KeyCode::Char('b'), KeyModifiers::NONE) => {
                self.bulk_popup.show(self.artworks.len());
                None
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) => {
                self.clear_selection();
                Some(ArtworksAction::SelectionCleared)
            }
            _ => None,
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the table and, when open, the bulk-select popover.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let header_box = if self.all_on_page_selected() { "[x]" } else { "[ ]" };
        let header = Row::new(
            std::iter::once(Cell::from(header_box))
                .chain(COLUMNS.iter().map(|&c| Cell::from(c))),
        )
        .style(t.header_style())
        .bottom_margin(1);

        let rows: Vec<Row> = self
            .artworks
            .iter()
            .map(|artwork| self.build_row(artwork))
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let title = if self.loading {
            format!(" Artworks (loading page {}) ", self.page)
        } else {
            " Artworks ".to_string()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(Span::styled(title, t.accent_style().add_modifier(Modifier::BOLD)))
                    .borders(Borders::ALL)
                    .border_style(t.muted_style()),
            )
            .highlight_style(t.cursor_style());

        frame.render_stateful_widget(table, area, &mut self.table_state);

        if self.artworks.is_empty() && !self.loading {
            let inner = Rect {
                x: area.x + 1,
                y: area.y + area.height / 2,
                width: area.width.saturating_sub(2),
                height: 1.min(area.height),
            };
            let empty = Paragraph::new(Span::styled("No artworks to show", t.muted_style()))
                .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(empty, inner);
        }

        self.bulk_popup.render(frame, area);
    }

    fn build_row<'a>(&self, artwork: &'a Artwork) -> Row<'a> {
        let t = theme();
        let checkbox = if self.selection.is_selected(artwork.id) {
            Cell::from(Span::styled(
                "[x]",
                Style::default().fg(t.selected).add_modifier(Modifier::BOLD),
            ))
        } else {
            Cell::from("[ ]")
        };

        Row::new(vec![
            checkbox,
            Cell::from(artwork.title.as_str()),
            Cell::from(artwork.place_of_origin.as_str()),
            Cell::from(artwork.artist_line()),
            Cell::from(artwork.inscriptions.lines().next().unwrap_or_default()),
            Cell::from(artwork.date_start.as_str()),
            Cell::from(artwork.date_end.as_str()),
        ])
    }

    /// Render the status bar: paginator, selection count, spinner.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let t = theme();
        let mut line: Line = self.paginator.status_line(self.artworks.len());

        line.spans.push(Span::styled(
            format!(" {} selected ", self.selection.selected_count()),
            Style::default().fg(t.selected),
        ));
        if self.loading && !spinner.is_empty() {
            line.spans.push(Span::styled(format!(" {}", spinner), t.accent_style()));
        }

        frame.render_widget(Paragraph::new(line), area);
    }
}
