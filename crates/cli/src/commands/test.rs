//! `vd test`: run suites whole, run one file, or pick interactively.
//!
//! The interactive path is where the picker earns its keep: the two suite
//! directories become the catalog groups, the persisted cache seeds the
//! default selection, and the committed selection is written back before the
//! suites run. A group marker in the selection runs the whole suite without
//! an explicit file list.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{info, warn};

use vexel_dev_core::cache;
use vexel_dev_core::catalog::Catalog;
use vexel_dev_core::config::Config;
use vexel_dev_core::error::{Error, Result};
use vexel_dev_core::execution;
use vexel_dev_core::selection::{Selection, SelectionEntry};

use crate::cli_args::{Suite, TestArgs};
use crate::picker;

pub const SUITES: [Suite; 2] = [Suite::Unit, Suite::Visual];

/// Lists `.js`/`.ts` files directly under `<test_dir>/<suite>`, sorted.
/// A missing suite directory is an empty group, not an error.
fn list_suite_files(test_dir: &Path, suite: Suite) -> Result<Vec<String>> {
    let suite_dir = test_dir.join(suite.as_str());
    if !suite_dir.exists() {
        warn!("Test suite directory `{}` is missing", suite_dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&suite_dir)
        .map_err(|e| Error::io_error("test suite", &suite_dir.display().to_string(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::io_error("test suite", &suite_dir.display().to_string(), e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        let is_test_source = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "js" || ext == "ts");
        if is_test_source && entry.path().is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Builds the two-group picker catalog from the suite directories.
///
/// # Errors
///
/// Returns an error if a suite directory exists but cannot be read.
pub fn build_catalog(config: &Config) -> Result<Catalog> {
    let test_dir = PathBuf::from(config.test_dir());
    let mut catalog = Catalog::new();
    for suite in SUITES {
        catalog.insert_group(suite.as_str(), list_suite_files(&test_dir, suite)?);
    }
    Ok(catalog)
}

/// Splits a committed selection into per-suite runs. A group marker runs the
/// whole suite (`None`); items run as an explicit runner-relative file list.
fn partition_selection(selection: &Selection, test_dir: &str) -> Vec<(Suite, Option<Vec<String>>)> {
    let mut runs = Vec::new();
    for suite in SUITES {
        if selection.has_group_marker(suite.as_str()) {
            runs.push((suite, None));
            continue;
        }

        let files: Vec<String> = selection
            .iter()
            .filter_map(|entry| match entry {
                SelectionEntry::Item { group, item } if group == suite.as_str() => {
                    Some(format!("{test_dir}/{group}/{item}"))
                }
                _ => None,
            })
            .collect();

        if !files.is_empty() {
            runs.push((suite, Some(files)));
        }
    }
    runs
}

fn run_suite(
    config: &Config,
    suite: Suite,
    files: Option<Vec<String>>,
    args: &TestArgs,
) -> Result<()> {
    let port = args.port.unwrap_or(match suite {
        Suite::Unit => config.unit_port,
        Suite::Visual => config.visual_port,
    });

    let mut line = config.test_runner_command.clone();
    if !args.dev {
        line.push("ci".to_string());
    }
    line.push("-p".to_string());
    line.push(port.to_string());
    line.push("-f".to_string());
    line.push(format!("{}/testem.{}.js", config.test_dir, suite));
    line.push("-l".to_string());
    line.push(
        args.contexts
            .iter()
            .map(|context| context.launcher_name())
            .join(","),
    );

    let mut environment = HashMap::new();
    environment.insert(
        "TEST_FILES".to_string(),
        files.as_deref().unwrap_or_default().join(","),
    );
    environment.insert("VERBOSE".to_string(), u8::from(args.verbose).to_string());
    environment.insert(
        "QUNIT_DEBUG_VISUAL_TESTS".to_string(),
        u8::from(args.debug).to_string(),
    );
    environment.insert(
        "QUNIT_RECREATE_VISUAL_REFS".to_string(),
        u8::from(args.recreate).to_string(),
    );
    if let Some(filter) = &args.filter {
        environment.insert("QUNIT_FILTER".to_string(), filter.clone());
    }
    if let Some(out) = &args.out {
        environment.insert("REPORT_FILE".to_string(), out.clone());
    }

    if args.launch {
        let url = format!("http://localhost:{port}/");
        if let Err(e) = open::that(&url) {
            warn!("Could not open `{url}`: {e}");
        }
    }

    let command = execution::command_from_line(&line, None)?;
    execution::execute_command(command, Some(environment))
}

/// Entry point for `vd test`.
///
/// # Errors
///
/// Returns an error if suite enumeration or the runner fails. A cancelled
/// interactive selection runs nothing and is not an error.
pub fn run(config: &Config, args: &TestArgs) -> Result<()> {
    if args.clear_cache {
        cache::clear_selection(&config.cache_path())?;
    }

    let suites: Vec<Suite> = if args.all {
        SUITES.to_vec()
    } else {
        args.suite.clone()
    };

    if !suites.is_empty() {
        for suite in suites {
            run_suite(config, suite, None, args)?;
        }
        return Ok(());
    }

    if let Some(file) = &args.file {
        let suite = if file.starts_with("visual") {
            Suite::Visual
        } else {
            Suite::Unit
        };
        let path = format!("{}/{}", config.test_dir, file);
        return run_suite(config, suite, Some(vec![path]), args);
    }

    // Interactive: seed from the cache, pick, persist, run per suite.
    let catalog = build_catalog(config)?;
    let cache_path = config.cache_path();
    let defaults = cache::load_selection(&cache_path);

    let Some(selection) = picker::select_candidates("Select test files", &catalog, defaults)?
    else {
        info!("Selection cancelled; not running tests.");
        return Ok(());
    };

    if let Err(e) = cache::save_selection(&cache_path, &selection) {
        warn!("Could not save selection cache: {e}");
    }

    for (suite, files) in partition_selection(&selection, &config.test_dir) {
        run_suite(config, suite, files, args)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn selection_of(entries: Vec<SelectionEntry>) -> Selection {
        let mut selection = Selection::new();
        for entry in entries {
            selection.toggle(entry);
        }
        selection
    }

    #[test]
    fn test_partition_marker_runs_whole_suite() {
        let selection = selection_of(vec![SelectionEntry::group_marker("unit")]);
        let runs = partition_selection(&selection, "test");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, Suite::Unit);
        assert!(runs[0].1.is_none());
    }

    #[test]
    fn test_partition_items_become_runner_paths() {
        let selection = selection_of(vec![
            SelectionEntry::item("unit", "canvas.js"),
            SelectionEntry::item("visual", "gradient.js"),
            SelectionEntry::item("unit", "path.js"),
        ]);

        let runs = partition_selection(&selection, "test");
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0],
            (
                Suite::Unit,
                Some(vec![
                    "test/unit/canvas.js".to_string(),
                    "test/unit/path.js".to_string(),
                ])
            )
        );
        assert_eq!(
            runs[1],
            (
                Suite::Visual,
                Some(vec!["test/visual/gradient.js".to_string()])
            )
        );
    }

    #[test]
    fn test_partition_empty_selection_runs_nothing() {
        assert!(partition_selection(&Selection::new(), "test").is_empty());
    }

    #[test]
    fn test_build_catalog_from_suite_directories() {
        let dir = TempDir::new().unwrap();
        let test_dir = dir.path().join("test");
        fs::create_dir_all(test_dir.join("unit")).unwrap();
        fs::create_dir_all(test_dir.join("visual")).unwrap();
        fs::write(test_dir.join("unit").join("b.js"), "").unwrap();
        fs::write(test_dir.join("unit").join("a.ts"), "").unwrap();
        fs::write(test_dir.join("unit").join("notes.md"), "").unwrap();
        fs::write(test_dir.join("visual").join("c.js"), "").unwrap();

        let config = Config {
            test_dir: test_dir.to_str().unwrap().to_string(),
            ..Config::default()
        };

        let catalog = build_catalog(&config).unwrap();
        assert_eq!(catalog.items("unit"), ["a.ts".to_string(), "b.js".to_string()]);
        assert_eq!(catalog.items("visual"), ["c.js".to_string()]);
    }

    #[test]
    fn test_missing_suite_directory_is_an_empty_group() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            test_dir: dir.path().join("nope").to_str().unwrap().to_string(),
            ..Config::default()
        };

        let catalog = build_catalog(&config).unwrap();
        assert!(catalog.items("unit").is_empty());
        assert!(catalog.items("visual").is_empty());
    }
}
