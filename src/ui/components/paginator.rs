//! Paginator for server-driven (lazy) pagination.
//!
//! The paginator never holds data. It knows the offset of the first visible
//! row, the page size, and the total reported by the server, and turns
//! navigation keys into zero-based `PageEvent`s for the host to act on.

use ratatui::text::{Line, Span};

use crate::ui::theme::theme;

/// Rows per page. Fixed, like the table it drives.
pub const ROWS_PER_PAGE: u32 = 10;

/// A page change reported by the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEvent {
    /// The zero-based page index.
    pub page: u32,
    /// Offset of the first row on that page.
    pub first: u64,
    /// Rows per page.
    pub rows: u32,
}

/// Pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    /// Offset of the first visible row.
    first: u64,
    /// Rows per page.
    rows: u32,
    /// Total records reported by the server.
    total_records: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(ROWS_PER_PAGE)
    }
}

impl Paginator {
    /// Create a paginator on the first page.
    pub fn new(rows: u32) -> Self {
        Self {
            first: 0,
            rows: rows.max(1),
            total_records: 0,
        }
    }

    /// Rows per page.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total records reported by the server.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Update the total record count.
    pub fn set_total_records(&mut self, total: u64) {
        self.total_records = total;
    }

    /// Position on a 1-based page number.
    pub fn set_page_number(&mut self, page: u32) {
        self.first = u64::from(page.saturating_sub(1)) * u64::from(self.rows);
    }

    /// The current zero-based page index.
    pub fn page_index(&self) -> u32 {
        (self.first / u64::from(self.rows)) as u32
    }

    /// Number of pages for the current total. Zero when the total is zero.
    pub fn page_count(&self) -> u32 {
        let pages = self.total_records.div_ceil(u64::from(self.rows));
        pages.min(u64::from(u32::MAX)) as u32
    }

    /// Navigate to a zero-based page index.
    ///
    /// Returns the event if `index` is in range and differs from the current
    /// page; otherwise nothing changes.
    pub fn go_to(&mut self, index: u32) -> Option<PageEvent> {
        if index >= self.page_count() || index == self.page_index() {
            return None;
        }
        self.first = u64::from(index) * u64::from(self.rows);
        Some(PageEvent {
            page: index,
            first: self.first,
            rows: self.rows,
        })
    }

    /// Navigate to the next page.
    pub fn next(&mut self) -> Option<PageEvent> {
        self.go_to(self.page_index().saturating_add(1))
    }

    /// Navigate to the previous page.
    pub fn prev(&mut self) -> Option<PageEvent> {
        let current = self.page_index();
        if current == 0 {
            return None;
        }
        self.go_to(current - 1)
    }

    /// Navigate to the first page.
    pub fn first_page(&mut self) -> Option<PageEvent> {
        self.go_to(0)
    }

    /// Navigate to the last page.
    pub fn last_page(&mut self) -> Option<PageEvent> {
        self.go_to(self.page_count().saturating_sub(1))
    }

    /// The status line: current page, row range and total.
    pub fn status_line(&self, rows_on_page: usize) -> Line<'static> {
        let t = theme();
        let page_count = self.page_count().max(1);
        let range = if rows_on_page == 0 {
            "no records".to_string()
        } else {
            format!(
                "{}-{} of {}",
                self.first + 1,
                self.first + rows_on_page as u64,
                self.total_records
            )
        };

        Line::from(vec![
            Span::styled(
                format!(" Page {} of {} ", self.page_index() + 1, page_count),
                t.accent_style(),
            ),
            Span::styled(format!(" {} ", range), t.muted_style()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator_with_total(total: u64) -> Paginator {
        let mut p = Paginator::default();
        p.set_total_records(total);
        p
    }

    #[test]
    fn test_defaults() {
        let p = Paginator::default();
        assert_eq!(p.rows(), ROWS_PER_PAGE);
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.page_count(), 0);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(paginator_with_total(100).page_count(), 10);
        assert_eq!(paginator_with_total(101).page_count(), 11);
        assert_eq!(paginator_with_total(1).page_count(), 1);
    }

    #[test]
    fn test_next_reports_zero_based_page() {
        let mut p = paginator_with_total(100);
        let event = p.next().unwrap();
        assert_eq!(
            event,
            PageEvent {
                page: 1,
                first: 10,
                rows: 10
            }
        );
        assert_eq!(p.page_index(), 1);
    }

    #[test]
    fn test_no_navigation_without_total() {
        let mut p = Paginator::default();
        assert!(p.next().is_none());
        assert!(p.last_page().is_none());
        assert!(p.prev().is_none());
    }

    #[test]
    fn test_prev_on_first_page_is_none() {
        let mut p = paginator_with_total(100);
        assert!(p.prev().is_none());
        assert!(p.first_page().is_none());
    }

    #[test]
    fn test_next_on_last_page_is_none() {
        let mut p = paginator_with_total(25);
        assert_eq!(p.last_page().unwrap().page, 2);
        assert!(p.next().is_none());
        assert_eq!(p.prev().unwrap().page, 1);
    }

    #[test]
    fn test_go_to_same_page_is_none() {
        let mut p = paginator_with_total(100);
        p.set_page_number(4);
        assert!(p.go_to(3).is_none());
        assert_eq!(p.go_to(9).unwrap().first, 90);
    }

    #[test]
    fn test_set_page_number() {
        let mut p = paginator_with_total(100);
        p.set_page_number(3);
        assert_eq!(p.page_index(), 2);
        assert_eq!(p.next().unwrap().first, 30);

        p.set_page_number(0);
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn test_status_line() {
        let mut p = paginator_with_total(126544);
        p.set_page_number(2);
        let text: String = p
            .status_line(10)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("Page 2 of 12655"));
        assert!(text.contains("11-20 of 126544"));
    }

    #[test]
    fn test_status_line_empty() {
        let p = Paginator::default();
        let text: String = p
            .status_line(0)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("no records"));
    }
}
