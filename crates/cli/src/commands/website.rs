//! `vd website` and `vd start`: export to and serve the companion website
//! checkout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::time::Duration;

use vexel_dev_core::config::Config;
use vexel_dev_core::error::Result;
use vexel_dev_core::{execution, export};

use crate::cli_args::{ExportArgs, IncludeTarget};

const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

fn include_targets(args: &ExportArgs) -> Vec<IncludeTarget> {
    if args.include.is_empty() {
        vec![IncludeTarget::Build, IncludeTarget::Tests]
    } else {
        args.include.clone()
    }
}

fn export_once(include: &[IncludeTarget], project_root: &Path, website_dir: &Path) {
    for target in include {
        match target {
            IncludeTarget::Build => export::export_build_assets(project_root, website_dir),
            IncludeTarget::Tests => export::export_tests(project_root, website_dir),
        }
    }
}

/// Paths whose changes trigger a re-export while watching.
fn watched_paths(config: &Config, include: &[IncludeTarget], project_root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for target in include {
        match target {
            IncludeTarget::Build => {
                for source in export::BUILD_SOURCES {
                    paths.push(project_root.join(source));
                }
            }
            IncludeTarget::Tests => paths.push(project_root.join(&config.test_dir)),
        }
    }
    paths
}

/// Spawns a fast bundle aimed straight at the website's `lib/` directory.
/// With `watch` the bundler keeps running and the child is handed back.
fn spawn_website_bundle(config: &Config, website_dir: &Path, watch: bool) -> Result<Option<Child>> {
    let mut line = config.bundler_command.clone();
    if watch {
        line.push("--watch".to_string());
    }

    let mut environment = HashMap::new();
    environment.insert("MINIFY".to_string(), "0".to_string());
    environment.insert(
        "BUILD_OUTPUT".to_string(),
        website_dir.join("lib").join("vexel.js").display().to_string(),
    );

    let command = execution::command_from_line(&line, None)?;
    if watch {
        execution::spawn_command(command, Some(environment)).map(Some)
    } else {
        execution::execute_command(command, Some(environment)).map(|()| None)
    }
}

/// Entry point for `vd website export`.
///
/// # Errors
///
/// Returns an error if the website checkout cannot be located or a build
/// fails. Individual copy failures are logged and skipped.
pub fn run_export(config: &Config, args: &ExportArgs) -> Result<()> {
    let project_root = PathBuf::from(".");
    let website_dir = PathBuf::from(config.website_dir());
    export::verify_website_checkout(&website_dir, &config.website_package_name)?;

    let include = include_targets(args);
    let _bundler = if include.contains(&IncludeTarget::Build) {
        spawn_website_bundle(config, &website_dir, args.watch)?
    } else {
        None
    };

    export_once(&include, &project_root, &website_dir);

    if args.watch {
        let paths = watched_paths(config, &include, &project_root);
        export::watch_paths(&paths, WATCH_DEBOUNCE, || {
            export_once(&include, &project_root, &website_dir);
        })?;
    }
    Ok(())
}

/// Entry point for `vd start` / `vd website start`: full export, dev server,
/// and a watch loop that keeps re-exporting until interrupted.
///
/// # Errors
///
/// Returns an error if the checkout cannot be located or the server cannot
/// be spawned.
pub fn run_start(config: &Config) -> Result<()> {
    let project_root = PathBuf::from(".");
    let website_dir = PathBuf::from(config.website_dir());
    export::verify_website_checkout(&website_dir, &config.website_package_name)?;

    let include = [IncludeTarget::Build, IncludeTarget::Tests];
    let _bundler = spawn_website_bundle(config, &website_dir, true)?;
    export_once(&include, &project_root, &website_dir);

    let server_command =
        execution::command_from_line(&config.website_start_command, Some(&website_dir))?;
    let _server = execution::spawn_command(server_command, None::<HashMap<String, String>>)?;

    let paths = watched_paths(config, &include, &project_root);
    export::watch_paths(&paths, WATCH_DEBOUNCE, || {
        export_once(&include, &project_root, &website_dir);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_defaults_to_everything() {
        let args = ExportArgs {
            include: vec![],
            watch: false,
        };
        assert_eq!(
            include_targets(&args),
            vec![IncludeTarget::Build, IncludeTarget::Tests]
        );
    }

    #[test]
    fn test_explicit_include_is_kept() {
        let args = ExportArgs {
            include: vec![IncludeTarget::Tests],
            watch: false,
        };
        assert_eq!(include_targets(&args), vec![IncludeTarget::Tests]);
    }

    #[test]
    fn test_watched_paths_cover_build_sources_and_test_dir() {
        let config = Config::default();
        let paths = watched_paths(
            &config,
            &[IncludeTarget::Build, IncludeTarget::Tests],
            Path::new("."),
        );

        assert_eq!(paths.len(), export::BUILD_SOURCES.len() + 1);
        assert!(paths.contains(&Path::new(".").join("test")));
    }
}
