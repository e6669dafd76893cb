//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use tracing::{debug, error, info, trace, warn};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::events::{Event, KeyContext};
use crate::logging::{fetch_span, FETCH_TARGET};
use crate::tasks::{ApiMessage, FetchRequest};
use crate::ui::{
    render_context_help, theme, ArtworksAction, ArtworksView, LoadingIndicator,
    NotificationManager,
};

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// Whether the application should quit.
    should_quit: bool,
    /// The artworks table.
    view: ArtworksView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Spinner shown while a page loads.
    loading: LoadingIndicator,
    /// Application configuration.
    config: Config,
    /// Token handed to the next fetch.
    next_request_id: u64,
    /// Token of the most recent fetch. Only its response is applied.
    latest_request_id: Option<u64>,
    /// A fetch waiting to be spawned by the main loop.
    pending_fetch: Option<FetchRequest>,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Self {
        debug!("Creating new application instance");

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using default: {}", e);
            Config::default()
        });

        Self::with_config(config)
    }

    /// Create a new application instance with the given configuration.
    ///
    /// The first page is requested immediately, as if the table had just
    /// moved onto page 1.
    pub fn with_config(config: Config) -> Self {
        debug!("Creating application with custom config");

        let mut app = Self {
            should_quit: false,
            view: ArtworksView::new(),
            notifications: NotificationManager::new(),
            loading: LoadingIndicator::new(),
            config,
            next_request_id: 1,
            latest_request_id: None,
            pending_fetch: None,
        };
        app.request_page(1);
        app
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get a reference to the artworks view.
    pub fn view_state(&self) -> &ArtworksView {
        &self.view
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Get a reference to the loading indicator.
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Check if a page fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// Get the application configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The token of the most recent fetch.
    pub fn latest_request_id(&self) -> Option<u64> {
        self.latest_request_id
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Enter the loading state and queue a fetch for `page`.
    ///
    /// Any earlier fetch still in flight is superseded.
    fn request_page(&mut self, page: u32) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request_id = Some(request_id);

        self.pending_fetch = Some(FetchRequest {
            request_id,
            page,
            limit: self.view.rows_per_page(),
        });
        self.view.set_loading(true);
        self.loading
            .start_with_message(format!("Loading page {}...", page));

        info!(page, request_id, "Requesting artworks page");
    }

    /// Take the pending fetch, if any, for the main loop to spawn.
    pub fn take_pending_fetch(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    /// Apply a message from a background task.
    ///
    /// Responses for anything but the latest request are dropped. A failed
    /// fetch is logged and otherwise ignored: the table keeps its rows and
    /// leaves the loading state.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::ArtworksFetched {
                request_id,
                page,
                result,
            } => {
                let _span = fetch_span(request_id, page).entered();

                if self.latest_request_id != Some(request_id) {
                    debug!(
                        target: FETCH_TARGET,
                        latest = ?self.latest_request_id,
                        "Discarding stale artworks response"
                    );
                    return;
                }

                match result {
                    Ok(artworks) => {
                        let total = artworks.total();
                        info!(
                            target: FETCH_TARGET,
                            rows = artworks.len(),
                            total,
                            "Artworks page loaded"
                        );
                        self.view.set_page_data(artworks.data, total);
                    }
                    Err(e) => {
                        error!(target: FETCH_TARGET, error = %e, "Failed to fetch artworks");
                    }
                }

                self.view.set_loading(false);
                self.loading.stop();
            }
        }
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    /// All state changes flow through this method for predictable behavior.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.handle_tick();
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            info!("Ctrl+C pressed, quitting");
            self.should_quit = true;
            return;
        }

        // The popover takes every other key while it is open
        if !self.view.is_bulk_select_open()
            && key_event.code == KeyCode::Char('q')
            && key_event.modifiers == KeyModifiers::NONE
        {
            info!("Quit key pressed");
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.view.handle_input(key_event) {
            self.handle_view_action(action);
        }
    }

    fn handle_view_action(&mut self, action: ArtworksAction) {
        match action {
            ArtworksAction::PageChanged(page) => {
                debug!(page, "Page change requested");
                self.request_page(page);
            }
            ArtworksAction::RowsSelected(count) => {
                debug!(count, "Bulk selected rows");
                self.notifications
                    .success(format!("Selected first {} rows", count));
            }
            ArtworksAction::BulkSelectSkipped => {
                debug!("Bulk select submitted without a positive count");
                self.notifications
                    .warning("Enter a number of rows greater than zero");
            }
            ArtworksAction::SelectionCleared => {
                info!("Cleared all selections");
                self.notifications.info("Selections cleared");
            }
        }
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        self.notifications.tick();
        if self.loading.is_active() {
            self.loading.tick();
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Table
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.view.render(frame, chunks[1]);

        if self.view.is_loading() && self.view.artworks().is_empty() {
            let spinner_area = Rect {
                y: chunks[1].y + chunks[1].height / 2,
                height: 1.min(chunks[1].height),
                ..chunks[1]
            };
            self.loading.render(frame, spinner_area);
        }

        let spinner = if self.loading.is_active() {
            self.loading.text()
        } else {
            String::new()
        };
        self.view.render_status_bar(frame, chunks[2], &spinner);

        let context = if self.view.is_bulk_select_open() {
            KeyContext::BulkSelect
        } else {
            KeyContext::Table
        };
        render_context_help(frame, chunks[3], context);

        // Notifications on top of everything
        self.notifications.render(frame, area);
    }

    /// Render the application header.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new("Artworks")
            .style(t.accent_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(t.muted_style()),
            );
        frame.render_widget(title, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Artwork, ArtworkPage, Pagination};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        App::with_config(Config::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn artwork_page(start: u64, count: u64, total: u64) -> ArtworkPage {
        ArtworkPage {
            data: (start..start + count)
                .map(|id| Artwork::new(id, format!("Artwork {}", id)))
                .collect(),
            pagination: Pagination {
                total,
                ..Pagination::default()
            },
        }
    }

    fn fetched(request: FetchRequest, result: Result<ArtworkPage, String>) -> ApiMessage {
        ApiMessage::ArtworksFetched {
            request_id: request.request_id,
            page: request.page,
            result,
        }
    }

    /// Build an app showing page 1 with ten rows out of 100.
    fn loaded_app() -> App {
        let mut app = test_app();
        let request = app.take_pending_fetch().unwrap();
        app.handle_api_message(fetched(request, Ok(artwork_page(1, 10, 100))));
        app
    }

    #[test]
    fn test_mount_requests_page_one() {
        let mut app = test_app();
        assert!(app.is_loading());
        assert!(app.loading().is_active());

        let request = app.take_pending_fetch().unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert_eq!(app.latest_request_id(), Some(request.request_id));
        assert_eq!(app.config().settings.request_timeout_secs, 30);

        assert!(app.take_pending_fetch().is_none());
    }

    #[test]
    fn test_mount_response_populates_table() {
        let mut app = test_app();
        let request = app.take_pending_fetch().unwrap();

        let page = ArtworkPage {
            data: vec![Artwork::new(1, "Starry Night and the Astronauts")],
            pagination: Pagination {
                total: 100,
                ..Pagination::default()
            },
        };
        app.handle_api_message(fetched(request, Ok(page)));

        assert_eq!(app.view_state().artworks().len(), 1);
        assert_eq!(app.view_state().total_records(), 100);
        assert!(!app.is_loading());
        assert!(!app.loading().is_active());
    }

    #[test]
    fn test_each_page_change_issues_one_fetch() {
        let mut app = loaded_app();

        for expected in 2..=5 {
            app.update(key(KeyCode::Char('n')));
            let request = app.take_pending_fetch().unwrap();
            assert_eq!(request.page, expected);
            assert!(app.take_pending_fetch().is_none());
            app.handle_api_message(fetched(
                request,
                Ok(artwork_page(u64::from(expected) * 10, 10, 100)),
            ));
        }

        app.update(key(KeyCode::End));
        assert_eq!(app.take_pending_fetch().unwrap().page, 10);
    }

    #[test]
    fn test_same_page_does_not_fetch() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('g')));
        assert!(app.take_pending_fetch().is_none());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_fetch_failure_keeps_rows_and_stops_loading() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        let request = app.take_pending_fetch().unwrap();
        assert!(app.is_loading());

        app.handle_api_message(fetched(request, Err("connection refused".to_string())));

        assert!(!app.is_loading());
        assert_eq!(app.view_state().artworks().len(), 10);
        assert_eq!(app.view_state().artworks()[0].id, 1);
        assert_eq!(app.view_state().total_records(), 100);
        assert!(app.notifications().is_empty());
    }

    #[test]
    fn test_body_without_data_keeps_rows() {
        let mut app = test_app();
        let request = app.take_pending_fetch().unwrap();
        app.handle_api_message(fetched(request, Ok(artwork_page(1, 2, 100))));

        app.update(key(KeyCode::Char('n')));
        let request = app.take_pending_fetch().unwrap();
        let result = serde_json::from_str::<ArtworkPage>(r#"{"pagination":{"total":100}}"#)
            .map_err(|e| e.to_string());
        assert!(result.is_err());
        app.handle_api_message(fetched(request, result));

        assert!(!app.is_loading());
        assert_eq!(app.view_state().artworks().len(), 2);
        assert_eq!(app.view_state().total_records(), 100);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = loaded_app();

        app.update(key(KeyCode::Char('n')));
        let slow = app.take_pending_fetch().unwrap();
        app.update(key(KeyCode::Char('n')));
        let fast = app.take_pending_fetch().unwrap();
        assert!(fast.request_id > slow.request_id);

        app.handle_api_message(fetched(fast, Ok(artwork_page(21, 10, 100))));
        app.handle_api_message(fetched(slow, Ok(artwork_page(11, 10, 100))));

        assert_eq!(app.view_state().page(), 3);
        assert_eq!(app.view_state().artworks()[0].id, 21);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut app = loaded_app();

        app.update(key(KeyCode::Char('n')));
        let old = app.take_pending_fetch().unwrap();
        app.update(key(KeyCode::Char('n')));
        let _current = app.take_pending_fetch().unwrap();

        app.handle_api_message(fetched(old, Err("timed out".to_string())));
        assert!(app.is_loading());
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char(' ')));
        assert!(app.view_state().selection().is_selected(1));

        app.update(key(KeyCode::Char('n')));
        let request = app.take_pending_fetch().unwrap();
        app.handle_api_message(fetched(request, Ok(artwork_page(11, 10, 100))));
        assert!(app.view_state().selected_rows().is_empty());

        app.update(key(KeyCode::Char('p')));
        let request = app.take_pending_fetch().unwrap();
        app.handle_api_message(fetched(request, Ok(artwork_page(1, 10, 100))));

        let selected: Vec<u64> = app
            .view_state()
            .selected_rows()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(selected, vec![1]);
    }

    #[test]
    fn test_bulk_select_flow_notifies() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('b')));
        app.update(key(KeyCode::Char('3')));
        app.update(key(KeyCode::Enter));

        let selected: Vec<u64> = app
            .view_state()
            .selected_rows()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(selected, vec![1, 2, 3]);
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_bulk_select_zero_warns_without_mutation() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('b')));
        app.update(key(KeyCode::Char('0')));
        app.update(key(KeyCode::Enter));

        assert!(app.view_state().selection().is_empty());
        assert!(!app.view_state().is_bulk_select_open());
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_q_inside_popover_does_not_quit() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('b')));
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert!(app.view_state().is_bulk_select_open());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = test_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());

        let mut app = test_app();
        app.update(Event::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_clear_selection() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('a')));
        assert_eq!(app.view_state().selection().selected_count(), 10);

        app.update(key(KeyCode::Char('c')));
        assert!(app.view_state().selection().is_empty());
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = test_app();
        let before = app.loading().spinner_frame();
        app.update(Event::Tick);
        assert_ne!(app.loading().spinner_frame(), before);
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut app = test_app();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let request = app.take_pending_fetch().unwrap();
        app.handle_api_message(fetched(request, Ok(artwork_page(1, 10, 100))));
        app.update(key(KeyCode::Char('b')));
        terminal.draw(|frame| app.view(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Artwork 1"));
        assert!(content.contains("Page 1 of 10"));
        assert!(content.contains("Select Rows"));
    }
}
