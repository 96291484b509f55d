#![cfg(feature = "tui")]

//! Defines a common trait for navigable parts of the TUI.

/// Something with a cursor that Up/Down (or the mouse wheel) moves.
pub trait NavigablePane {
    /// Moves the cursor to the next item.
    /// Implementations should handle wrapping from the last to the first item.
    fn next(&mut self);

    /// Moves the cursor to the previous item.
    /// Implementations should handle wrapping from the first to the last item.
    fn previous(&mut self);
}
