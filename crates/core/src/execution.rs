use std::collections::HashMap;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Builds a [`Command`] from a configured command line (program + args).
///
/// # Errors
///
/// Returns an error if the line is empty.
pub fn command_from_line(line: &[String], working_directory: Option<&Path>) -> Result<Command> {
    let (program, args) = line
        .split_first()
        .ok_or_else(|| Error::Misc("Configured command line is empty".to_string()))?;

    let mut command = Command::new(program);
    command.args(args);
    if let Some(working_directory) = working_directory {
        command.current_dir(working_directory);
    }
    Ok(command)
}

/// Executes a command with inherited stdio and optional extra environment
/// variables, waiting for it to finish.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_command<S: ::std::hash::BuildHasher>(
    mut command: Command,
    environment: Option<HashMap<String, String, S>>,
) -> Result<()> {
    let mut command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(environment) = environment {
        info!("Executing with environment variables: {:?}", environment);
        command = command.envs(environment);
    }

    let subprocess_exit_success = command.spawn()?.wait()?.success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}

/// Spawns a command with inherited stdio and leaves it running. The caller
/// owns the [`Child`] and decides whether to wait on it.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned.
pub fn spawn_command<S: ::std::hash::BuildHasher>(
    mut command: Command,
    environment: Option<HashMap<String, String, S>>,
) -> Result<Child> {
    let mut command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(environment) = environment {
        info!("Spawning with environment variables: {:?}", environment);
        command = command.envs(environment);
    }

    Ok(command.spawn()?)
}
