//! Key binding definitions.
//!
//! The bindings themselves are matched in `App` and the components; this is
//! the single source for what the hint bar tells the user.

/// The UI context a key binding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// The artworks table has focus.
    Table,
    /// The bulk-select popover is open.
    BulkSelect,
}

impl KeyContext {
    /// Human-readable name of the context.
    pub fn display_name(&self) -> &'static str {
        match self {
            KeyContext::Table => "Table",
            KeyContext::BulkSelect => "Select Rows",
        }
    }
}

/// A single key binding description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// The key or key combination, as displayed.
    pub key: &'static str,
    /// What the key does.
    pub description: &'static str,
    /// Where the key applies.
    pub context: KeyContext,
}

const fn binding(key: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
    }
}

/// All key bindings, in display order.
pub fn get_keybindings() -> Vec<Keybinding> {
    use KeyContext::*;
    vec![
        binding("j/k", "Move down/up", Table),
        binding("Space", "Toggle row selection", Table),
        binding("a", "Toggle all rows on page", Table),
        binding("n/p", "Next/previous page", Table),
        binding("g/G", "First/last page", Table),
        binding("b", "Select first N rows", Table),
        binding("c", "Clear all selections", Table),
        binding("q", "Quit", Table),
        binding("0-9", "Enter row count", BulkSelect),
        binding("Enter", "Submit", BulkSelect),
        binding("Esc", "Cancel", BulkSelect),
    ]
}

/// Key bindings for one context.
pub fn get_keybindings_for(context: KeyContext) -> Vec<Keybinding> {
    get_keybindings()
        .into_iter()
        .filter(|b| b.context == context)
        .collect()
}

/// The short hint line for a context, with keys in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[j/k] move  [Space] select  [a] page  [n/p] page  [g/G] first/last  [b] select N  [c] clear  [q] quit"
        }
        KeyContext::BulkSelect => "[0-9] rows  [Enter] submit  [Esc] cancel",
    }
}
