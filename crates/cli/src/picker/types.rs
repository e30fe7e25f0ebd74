//! Type definitions for the picker list and UI state.
//!
//! This module defines the types shared by the query engine and the
//! interaction loop: renderable rows, session outcomes, and the viewport
//! bookkeeping for scrolling.

use vexel_dev_core::selection::{Selection, SelectionEntry};

/// One renderable row of the picker list.
///
/// Separators frame the pinned block of already-selected entries; they are
/// not selectable and the pointer skips over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Entry(SelectionEntry),
    Separator,
}

impl DisplayRow {
    #[must_use]
    pub fn entry(&self) -> Option<&SelectionEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Separator => None,
        }
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

/// How one picker session ended.
///
/// A confirmed-but-empty selection is a valid outcome and is distinct from
/// cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Confirmed(Selection),
    Cancelled,
}

/// Direction to cycle the pointer through the list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the row list when there are more rows than
/// can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for one picker session render.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Row the pointer is on (index into the full row list).
    pub pointer: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Current search text; always live, every keystroke re-filters.
    pub query: String,
}
