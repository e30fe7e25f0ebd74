//! Persistence of the last committed picker selection.
//!
//! The cache is a JSON array of `{group, item}` objects, the `item` field
//! absent for group markers, written with indentation so it stays
//! hand-editable. A missing, empty or unparsable file is the same as an
//! empty selection; the cache is a convenience, never a source of failure.
//!
//! One CLI session per cache path at a time. There is no lock; concurrent
//! sessions against the same path will race on the final write.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::selection::{Selection, SelectionEntry};

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<String>,
}

impl From<&SelectionEntry> for CacheEntry {
    fn from(entry: &SelectionEntry) -> Self {
        match entry {
            SelectionEntry::Item { group, item } => Self {
                group: group.clone(),
                item: Some(item.clone()),
            },
            SelectionEntry::Group { group } => Self {
                group: group.clone(),
                item: None,
            },
        }
    }
}

impl From<CacheEntry> for SelectionEntry {
    fn from(entry: CacheEntry) -> Self {
        match entry.item {
            // An explicit empty item is the legacy spelling of a marker.
            Some(item) if !item.is_empty() => Self::item(entry.group, item),
            _ => Self::group_marker(entry.group),
        }
    }
}

/// Reads the persisted selection. Absent or unreadable caches degrade to an
/// empty selection; this never fails.
pub fn load_selection(path: &str) -> Selection {
    if !Path::new(path).exists() {
        return Selection::new();
    }

    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not read selection cache at `{path}`: {e}");
            return Selection::new();
        }
    };

    if body.trim().is_empty() {
        return Selection::new();
    }

    match serde_json::from_str::<Vec<CacheEntry>>(&body) {
        Ok(entries) => Selection::from_entries(entries.into_iter().map(SelectionEntry::from)),
        Err(e) => {
            warn!("Ignoring corrupt selection cache at `{path}`: {e}");
            Selection::new()
        }
    }
}

/// Overwrites the cache with the given selection, creating the containing
/// directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written, or if
/// serialization fails. Callers log this; a completed session is not failed
/// retroactively over a cache write.
pub fn save_selection(path: &str, selection: &Selection) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io_error("selection cache", path, e))?;
        }
    }

    let entries: Vec<CacheEntry> = selection.iter().map(CacheEntry::from).collect();
    let body = serde_json::to_string_pretty(&entries)
        .map_err(|e| Error::json_error("writing", "selection cache", path, e))?;

    fs::write(path, body).map_err(|e| Error::io_error("selection cache", path, e))
}

/// Deletes the cache file. Missing file is fine.
///
/// # Errors
///
/// Returns an error for any removal failure other than the file not existing.
pub fn clear_selection(path: &str) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io_error("selection cache", path, e)),
    }
}
