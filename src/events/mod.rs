//! Event handling for the application.
//!
//! This module handles keyboard input and terminal events, and describes the
//! key bindings shown in the hint bar.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{get_context_hints, get_keybindings, KeyContext, Keybinding};

/// Application events consumed by `App::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate; drives animations and timers.
    Tick,
    /// Request to quit the application.
    Quit,
}
