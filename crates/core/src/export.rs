//! Export of build sources and test suites into the companion website
//! checkout, with an optional debounced watch loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use log::{error, info, warn};
use notify::{EventKind, RecursiveMode, Watcher};

use crate::error::{Error, Result};

/// Paths copied by a build export, relative to the project root.
pub const BUILD_SOURCES: &[&str] = &["src", "lib", "HEADER.js"];

/// Paths copied by a test export, relative to the project root.
pub const TEST_SOURCES: &[&str] = &["test/unit", "test/visual", "test/fixtures", "test/lib"];

/// Checks that `website_dir` looks like the expected checkout: present, and
/// its package manifest carries the expected `name`.
///
/// # Errors
///
/// Returns [`Error::WebsiteNotFound`] when the directory or manifest is
/// missing or the package name does not match.
pub fn verify_website_checkout(website_dir: &Path, expected_package_name: &str) -> Result<()> {
    let manifest = website_dir.join("package.json");
    let body = fs::read_to_string(&manifest)
        .map_err(|_| Error::WebsiteNotFound(website_dir.display().to_string()))?;

    let parsed: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| Error::json_error("reading", "website package manifest", &manifest.display().to_string(), e))?;

    if parsed.get("name").and_then(serde_json::Value::as_str) == Some(expected_package_name) {
        Ok(())
    } else {
        Err(Error::WebsiteNotFound(website_dir.display().to_string()))
    }
}

fn copy_recursive(from: &Path, to: &Path) -> std::io::Result<()> {
    if from.is_dir() {
        fs::create_dir_all(to)?;
        for entry in fs::read_dir(from)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &to.join(entry.file_name()))?;
        }
    } else {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to)?;
    }
    Ok(())
}

/// Copies one file or directory tree, logging the outcome. Missing sources
/// and copy failures are logged, not fatal; an export keeps going.
pub fn copy_entry(from: &Path, to: &Path) {
    if !from.exists() {
        warn!("Skipping missing export source `{}`", from.display());
        return;
    }

    match copy_recursive(from, to) {
        Ok(()) => info!("copied {} to {}", from.display(), to.display()),
        Err(e) => error!("Failed to copy {} to {}: {e}", from.display(), to.display()),
    }
}

/// Copies the library's package manifest and build sources into the website
/// checkout (`lib/package.json` and `build/files/<path>`).
pub fn export_build_assets(project_root: &Path, website_dir: &Path) {
    copy_entry(
        &project_root.join("package.json"),
        &website_dir.join("lib").join("package.json"),
    );
    for source in BUILD_SOURCES {
        copy_entry(
            &project_root.join(source),
            &website_dir.join("build").join("files").join(source),
        );
    }
    info!("exported build assets to {}", website_dir.display());
}

/// Copies the test suites into the website checkout under the same relative
/// paths.
pub fn export_tests(project_root: &Path, website_dir: &Path) {
    for source in TEST_SOURCES {
        copy_entry(&project_root.join(source), &website_dir.join(source));
    }
    info!("exported tests to {}", website_dir.display());
}

/// Watches `paths` recursively and invokes `on_change` after each debounced
/// burst of filesystem events. Blocks until the watcher channel closes.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created or a path cannot be
/// watched.
pub fn watch_paths<F: FnMut()>(paths: &[PathBuf], debounce: Duration, mut on_change: F) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        if let Ok(event) = event {
            if matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                let _ = tx.send(());
            }
        }
    })?;

    for path in paths {
        if path.exists() {
            watcher.watch(path, RecursiveMode::Recursive)?;
        } else {
            warn!("Not watching missing path `{}`", path.display());
        }
    }

    info!("watching {} path(s) for changes", paths.len());
    loop {
        // Block for the first event of a burst, then drain the rest of the
        // burst until the debounce window goes quiet.
        if rx.recv().is_err() {
            return Ok(());
        }
        loop {
            match rx.recv_timeout(debounce) {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }
        on_change();
    }
}
