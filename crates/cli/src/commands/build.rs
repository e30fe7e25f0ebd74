//! `vd build` and `vd dev`: drive the configured bundler.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use vexel_dev_core::config::Config;
use vexel_dev_core::error::{Error, Result};
use vexel_dev_core::execution;

use crate::cli_args::BuildArgs;

/// Derives the minified sibling of an output path: `dist/vexel.js` becomes
/// `dist/vexel.min.js`.
fn min_output_path(output: &str) -> String {
    let path = Path::new(output);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(output);
    let min_name = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}.min.{ext}"),
        None => format!("{stem}.min"),
    };
    path.with_file_name(min_name).display().to_string()
}

/// Environment the bundler reads its build parameters from.
fn build_environment(args: &BuildArgs) -> HashMap<String, String> {
    let mut environment = HashMap::new();
    environment.insert("MINIFY".to_string(), u8::from(!args.fast).to_string());
    if let Some(input) = &args.input {
        environment.insert("BUILD_INPUT".to_string(), input.clone());
    }
    if let Some(output) = &args.output {
        environment.insert("BUILD_OUTPUT".to_string(), output.clone());
        if !args.fast {
            environment.insert("BUILD_MIN_OUTPUT".to_string(), min_output_path(output));
        }
    }
    environment
}

fn bundler_command(config: &Config, watch: bool) -> Result<Command> {
    let mut line = config.bundler_command.clone();
    if watch {
        line.push("--watch".to_string());
    }
    execution::command_from_line(&line, None)
}

/// Runs one bundler build (or leaves it watching).
///
/// # Errors
///
/// Returns an error if the bundler cannot be spawned or exits non-zero.
pub fn run(config: &Config, args: &BuildArgs) -> Result<()> {
    let command = bundler_command(config, args.watch)?;
    execution::execute_command(command, Some(build_environment(args)))
}

/// `vd dev`: keeps the configured watch builds running side by side until
/// they exit.
///
/// # Errors
///
/// Returns an error if any build cannot be spawned or exits non-zero.
pub fn run_dev(config: &Config) -> Result<()> {
    let mut children = Vec::new();
    for line in &config.dev_commands {
        let command = execution::command_from_line(line, None)?;
        children.push(execution::spawn_command(
            command,
            None::<HashMap<String, String>>,
        )?);
    }

    for mut child in children {
        if !child.wait()?.success() {
            return Err(Error::SubProcessExit);
        }
    }
    Ok(())
}
