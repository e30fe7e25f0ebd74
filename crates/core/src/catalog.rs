//! The candidate catalog: which groups exist and what they contain.
//!
//! A catalog is an ordered mapping from group name to the item names
//! currently available in that group. Group order and within-group order are
//! both significant; they are the tie-break for everything downstream.

use indexmap::IndexMap;

use crate::selection::{Selection, SelectionEntry};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: IndexMap<String, Vec<String>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Adds a group, replacing its items if it already exists.
    pub fn insert_group(&mut self, group: impl Into<String>, items: Vec<String>) {
        self.groups.insert(group.into(), items);
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[must_use]
    pub fn items(&self, group: &str) -> &[String] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    /// One marker entry per group, in group order.
    pub fn markers(&self) -> Vec<SelectionEntry> {
        self.groups
            .keys()
            .map(SelectionEntry::group_marker)
            .collect()
    }

    /// The flat candidate list: every item of every group, group order first,
    /// then the group's own item order.
    pub fn candidates(&self) -> Vec<SelectionEntry> {
        self.groups
            .iter()
            .flat_map(|(group, items)| {
                items
                    .iter()
                    .map(move |item| SelectionEntry::item(group, item))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Expands a committed selection into concrete `(group, item)` pairs
    /// against the current enumeration. A group marker resolves to every item
    /// the group holds *now*, not at selection time. Entries referring to
    /// groups or items no longer present resolve to nothing.
    pub fn resolve(&self, selection: &Selection) -> Vec<(String, String)> {
        let mut resolved = Vec::new();
        for entry in selection {
            match entry {
                SelectionEntry::Group { group } => {
                    for item in self.items(group) {
                        resolved.push((group.clone(), item.clone()));
                    }
                }
                SelectionEntry::Item { group, item } => {
                    if self.items(group).iter().any(|known| known == item) {
                        resolved.push((group.clone(), item.clone()));
                    }
                }
            }
        }
        resolved
    }
}
