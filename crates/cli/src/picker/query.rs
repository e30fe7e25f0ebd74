//! The query engine: recomputes the visible row list on every query edit.
//!
//! Layout of a result: the pinned block (current selection in insertion
//! order, plus a synthesized marker for any group not otherwise reachable)
//! framed by separators, followed by the fuzzy-filtered pool of everything
//! still selectable.
//!
//! Every recomputation is stamped with a monotonically increasing sequence
//! number and applied to the [`RenderList`] last-write-wins: a result older
//! than the one already applied is discarded, so the screen always reflects
//! the most recently initiated query.

use vexel_dev_core::catalog::Catalog;
use vexel_dev_core::selection::{Selection, SelectionEntry};

use super::filter::filter_entries;
use super::types::DisplayRow;

/// One sequence-stamped recomputation of the visible rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub seq: u64,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Default)]
pub struct QueryEngine {
    next_seq: u64,
}

impl QueryEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the row list for `query` against the current selection.
    pub fn source(&mut self, query: &str, catalog: &Catalog, selection: &Selection) -> QueryResult {
        self.next_seq += 1;

        let mut pinned: Vec<SelectionEntry> = selection.iter().cloned().collect();

        // Selectable pool: every group marker, then every candidate. Entries
        // already selected stay out, as do items of any bulk-selected group;
        // those are covered by their marker until it is deselected.
        let mut pool: Vec<SelectionEntry> = catalog.markers();
        pool.extend(catalog.candidates());
        pool.retain(|entry| {
            !selection.contains(entry)
                && (entry.is_group_marker() || !selection.has_group_marker(entry.group()))
        });

        let filtered = filter_entries(query, pool);

        // Bulk-select must stay reachable under any query: a marker that is
        // neither selected nor left in the filtered pool is appended to the
        // pinned block.
        for group in catalog.group_names() {
            let marker = SelectionEntry::group_marker(group);
            if !pinned.contains(&marker) && !filtered.contains(&marker) {
                pinned.push(marker);
            }
        }

        let mut rows = Vec::with_capacity(pinned.len() + filtered.len() + 2);
        if !pinned.is_empty() {
            rows.push(DisplayRow::Separator);
            rows.extend(pinned.into_iter().map(DisplayRow::Entry));
            rows.push(DisplayRow::Separator);
        }
        rows.extend(filtered.into_iter().map(DisplayRow::Entry));

        QueryResult {
            seq: self.next_seq,
            rows,
        }
    }
}

/// The render buffer. Applies results newest-wins; stale results fall on
/// the floor.
#[derive(Debug, Default)]
pub struct RenderList {
    applied_seq: u64,
    rows: Vec<DisplayRow>,
}

impl RenderList {
    /// Applies `result` if it is newer than what is on screen. Returns
    /// whether the rows changed.
    pub fn apply(&mut self, result: QueryResult) -> bool {
        if result.seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = result.seq;
        self.rows = result.rows;
        true
    }

    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
