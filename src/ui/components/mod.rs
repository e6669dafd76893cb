//! Reusable UI components.

mod bulk_select;
mod help_bar;
mod input;
mod loading;
mod notification;
mod paginator;

pub use bulk_select::{BulkSelectAction, BulkSelectPopup};
pub use help_bar::render_context_help;
pub use loading::LoadingIndicator;
pub use notification::NotificationManager;
pub use paginator::{PageEvent, Paginator};
