//! Selection entries and the ordered selection set.
//!
//! The picker operates on two granularities at once: individual files and
//! whole groups. [`SelectionEntry`] models both as a tagged variant so a
//! group marker can never be confused with a file whose name happens to be
//! empty. [`Selection`] keeps the chosen entries in insertion order, unique
//! by identity, and enforces the one structural rule of the picker: a group
//! marker and individual items of the same group never coexist.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

/// One selectable record: a concrete file within a group, or a marker
/// standing for every file currently enumerated under a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionEntry {
    Item { group: String, item: String },
    Group { group: String },
}

impl SelectionEntry {
    pub fn item(group: impl Into<String>, item: impl Into<String>) -> Self {
        Self::Item {
            group: group.into(),
            item: item.into(),
        }
    }

    pub fn group_marker(group: impl Into<String>) -> Self {
        Self::Group {
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Self::Item { group, .. } | Self::Group { group } => group,
        }
    }

    #[must_use]
    pub fn is_group_marker(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Name shown in the list and matched against the query.
    ///
    /// Items render as `group/item`, markers as `group/`.
    pub fn display_name(&self) -> String {
        match self {
            Self::Item { group, item } => format!("{group}/{item}"),
            Self::Group { group } => format!("{group}/"),
        }
    }
}

impl Display for SelectionEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// What a [`Selection::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The entry is an item of a group whose marker is currently selected.
    /// The marker wins; the selection is unchanged.
    Rejected,
}

/// The ordered, deduplicated set of entries one picker session has chosen.
///
/// Invariant: for any group with a selected marker, no item of that group is
/// selected. Selecting a marker evicts the group's items; the reverse
/// direction is rejected rather than auto-resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: IndexSet<SelectionEntry>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from entries in order, dropping duplicates and any
    /// item whose group marker appears anywhere in the input. Used when
    /// seeding from a persisted cache, which may have been edited by hand.
    pub fn from_entries(entries: impl IntoIterator<Item = SelectionEntry>) -> Self {
        let entries: Vec<SelectionEntry> = entries.into_iter().collect();
        let marked: IndexSet<&str> = entries
            .iter()
            .filter(|e| e.is_group_marker())
            .map(SelectionEntry::group)
            .collect();

        let mut selection = Self::new();
        for entry in &entries {
            if !entry.is_group_marker() && marked.contains(entry.group()) {
                continue;
            }
            selection.entries.insert(entry.clone());
        }
        selection
    }

    /// Toggles one entry in or out of the selection.
    ///
    /// Removal never evicts anything else. Adding a group marker evicts every
    /// selected item of that group first. Adding an item while its group's
    /// marker is selected is rejected. Additions append; existing order is
    /// preserved.
    pub fn toggle(&mut self, entry: SelectionEntry) -> Toggle {
        if self.entries.shift_remove(&entry) {
            return Toggle::Removed;
        }

        match &entry {
            SelectionEntry::Item { group, .. } if self.has_group_marker(group) => Toggle::Rejected,
            SelectionEntry::Group { group } => {
                let group = group.clone();
                self.entries
                    .retain(|existing| existing.is_group_marker() || existing.group() != group);
                self.entries.insert(entry);
                Toggle::Added
            }
            SelectionEntry::Item { .. } => {
                self.entries.insert(entry);
                Toggle::Added
            }
        }
    }

    #[must_use]
    pub fn contains(&self, entry: &SelectionEntry) -> bool {
        self.entries.contains(entry)
    }

    #[must_use]
    pub fn has_group_marker(&self, group: &str) -> bool {
        self.entries
            .contains(&SelectionEntry::group_marker(group))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectionEntry;
    type IntoIter = indexmap::set::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
