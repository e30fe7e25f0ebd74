//! `vd transform`: pick source files and hand them to the transform script.
//!
//! The catalog groups source files by their directory relative to the source
//! root, so `shapes/rect.js` is the entry `rect.js` in group `shapes`. This
//! flow always starts from an empty selection; unlike `vd test` it does not
//! read or write the persisted cache.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use vexel_dev_core::catalog::Catalog;
use vexel_dev_core::config::Config;
use vexel_dev_core::error::{Error, Result};
use vexel_dev_core::selection::Selection;
use vexel_dev_core::{execution, git};

use crate::cli_args::TransformArgs;
use crate::picker;

/// Group name for files sitting directly in the source root.
const ROOT_GROUP: &str = ".";

fn is_source_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "js" || ext == "ts")
}

fn collect_groups(root: &Path, dir: &Path, catalog: &mut Catalog) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::io_error("source directory", &dir.display().to_string(), e))?;

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| Error::io_error("source directory", &dir.display().to_string(), e))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else {
            let name = entry.file_name().to_string_lossy().to_string();
            if is_source_file(&name) {
                files.push(name);
            }
        }
    }
    files.sort();
    subdirs.sort();

    if !files.is_empty() {
        let group = dir
            .strip_prefix(root)
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .map_or_else(
                || ROOT_GROUP.to_string(),
                |relative| relative.to_string_lossy().replace('\\', "/"),
            );
        catalog.insert_group(group, files);
    }

    for subdir in subdirs {
        collect_groups(root, &subdir, catalog)?;
    }
    Ok(())
}

/// Enumerates the source tree into the picker catalog, one group per
/// directory.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn build_catalog(source_dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    if source_dir.exists() {
        collect_groups(source_dir, source_dir, &mut catalog)?;
    }
    Ok(catalog)
}

/// Maps resolved `(group, item)` pairs back to paths under the source root.
fn resolved_paths(source_dir: &Path, resolved: Vec<(String, String)>) -> Vec<String> {
    resolved
        .into_iter()
        .map(|(group, item)| {
            let mut path = source_dir.to_path_buf();
            if group != ROOT_GROUP {
                path.push(&group);
            }
            path.push(&item);
            path.display().to_string()
        })
        .collect()
}

/// Entry point for `vd transform`.
///
/// # Errors
///
/// Returns an error if enumeration, git, or the transform script fail. A
/// cancelled selection transforms nothing and is not an error.
pub fn run(config: &Config, args: &TransformArgs) -> Result<()> {
    let source_dir = PathBuf::from(config.source_dir());

    let files: Option<Vec<String>> = if let Some(git_ref) = &args.diff {
        let info = git::collect_info(Path::new("."), git_ref)?;
        info!(
            "{} file(s) differ from `{git_ref}` on branch `{}`",
            info.changes.len(),
            info.branch
        );
        Some(info.changes)
    } else if args.all {
        None
    } else {
        let catalog = build_catalog(&source_dir)?;
        let Some(selection) =
            picker::select_candidates("Select files to transform to es6", &catalog, Selection::new())?
        else {
            info!("Selection cancelled; nothing to transform.");
            return Ok(());
        };
        Some(resolved_paths(&source_dir, catalog.resolve(&selection)))
    };

    if let Some(files) = &files {
        if files.is_empty() {
            info!("No files selected; nothing to transform.");
            return Ok(());
        }
    }

    let mut line = config.transform_command.clone();
    if args.overwrite {
        line.push("--overwrite".to_string());
    }
    if args.no_exports {
        line.push("--no-exports".to_string());
    }
    if args.index {
        line.push("--index".to_string());
    }
    if args.typescript {
        line.push("--typescript".to_string());
    }
    if args.verbose {
        line.push("--verbose".to_string());
    }
    if args.all {
        line.push("--all".to_string());
    }
    if let Some(files) = files {
        line.extend(files);
    }

    let command = execution::command_from_line(&line, None)?;
    execution::execute_command(command, None::<std::collections::HashMap<String, String>>)
}
