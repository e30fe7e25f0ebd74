//! Interactive grouped multi-select picker.
//!
//! This module provides the terminal component both `vd test` and
//! `vd transform` use to choose files: a searchable, checkbox-style list of
//! candidates across named groups, with a "whole group" marker entry per
//! group and the previous selection pinned at the top as the default.
//!
//! # Key Features
//!
//! - **Fuzzy Search**: type to filter candidates, every keystroke re-ranks
//! - **Group Markers**: one entry per group selects everything it contains,
//!   evicting individually-picked files of that group
//! - **Pinned Selection**: already-selected entries stay visible above the
//!   filtered pool, framed by separators
//! - **Keyboard Navigation**: arrows or mouse scroll to move, space to
//!   toggle, enter to confirm, escape to cancel
//!
//! Cancelling is not an error and is distinct from confirming an empty
//! selection; callers receive `None` for the former and an empty
//! [`Selection`] for the latter.

// Export public items from submodules
pub mod filter;
pub mod query;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use query::{QueryEngine, QueryResult, RenderList};
pub use types::{DisplayRow, PickerOutcome};
pub use ui::run_picker;

use vexel_dev_core::catalog::Catalog;
use vexel_dev_core::error::Result;
use vexel_dev_core::selection::Selection;

/// Runs one picker session and folds the outcome into an `Option`.
///
/// # Errors
///
/// Returns an error only for terminal I/O failures.
pub fn select_candidates(
    prompt: &str,
    catalog: &Catalog,
    defaults: Selection,
) -> Result<Option<Selection>> {
    match ui::run_picker(prompt, catalog, defaults)? {
        PickerOutcome::Confirmed(selection) => Ok(Some(selection)),
        PickerOutcome::Cancelled => Ok(None),
    }
}
