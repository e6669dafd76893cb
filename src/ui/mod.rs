//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the artworks view and the
//! reusable components it is built from.

pub mod components;
pub mod theme;
mod views;

pub use components::{render_context_help, LoadingIndicator, NotificationManager};
pub use theme::theme;
pub use views::{ArtworksAction, ArtworksView};
