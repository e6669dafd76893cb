//! artworks-tui - browse the Art Institute of Chicago catalog from the terminal
//!
//! One page of artworks is shown at a time, fetched on demand from the
//! public API. Rows can be selected individually, a page at a time, or the
//! first N rows of a page at once; selections persist across pages.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod selection;
pub mod tasks;
pub mod ui;
