//! Repository state via spawned `git` commands.
//!
//! Only `transform --diff` needs this; the parsing is split out so it can be
//! tested without a repository.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// One entry of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub status: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct GitInfo {
    pub branch: String,
    pub tag: String,
    pub user: String,
    pub uncommitted: Vec<ChangeRecord>,
    /// Files differing from the compared ref, repository-relative.
    pub changes: Vec<String>,
}

fn run_git(working_directory: &Path, args: &[&str]) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(args)
        .current_dir(working_directory)
        .output()?;

    if !output.status.success() {
        return Err(Error::Git {
            command: format!("git {}", args.join(" ")),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
}

fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_porcelain(lines: &[String]) -> Vec<ChangeRecord> {
    lines
        .iter()
        .filter_map(|line| {
            let (status, path) = line.split_once(' ')?;
            Some(ChangeRecord {
                status: status.to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}

/// Files that differ from `branch_ref`, per `git diff --name-only`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or exits non-zero.
pub fn changed_files(working_directory: &Path, branch_ref: &str) -> Result<Vec<String>> {
    run_git(working_directory, &["diff", branch_ref, "--name-only"])
}

/// Collects branch, tag, user and change state in one call.
///
/// # Errors
///
/// Returns an error if any of the underlying git commands fail.
pub fn collect_info(working_directory: &Path, branch_ref: &str) -> Result<GitInfo> {
    let branch = run_git(working_directory, &["branch", "--show-current"])?
        .into_iter()
        .next()
        .unwrap_or_default();
    let tag = run_git(working_directory, &["describe", "--tags"])?
        .into_iter()
        .next()
        .unwrap_or_default();
    let user = run_git(working_directory, &["config", "user.name"])?
        .into_iter()
        .next()
        .unwrap_or_default();
    let uncommitted = parse_porcelain(&run_git(working_directory, &["status", "--porcelain"])?);
    let changes = changed_files(working_directory, branch_ref)?;

    Ok(GitInfo {
        branch,
        tag,
        user,
        uncommitted,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trims_and_drops_blanks() {
        let lines = split_lines("src/a.js\n\n  src/b.js  \n");
        assert_eq!(lines, vec!["src/a.js", "src/b.js"]);
    }

    #[test]
    fn test_parse_porcelain_splits_status_and_path() {
        let lines = vec!["M src/shape.js".to_string(), "?? demo/new.js".to_string()];
        let records = parse_porcelain(&lines);
        assert_eq!(
            records,
            vec![
                ChangeRecord {
                    status: "M".to_string(),
                    path: "src/shape.js".to_string(),
                },
                ChangeRecord {
                    status: "??".to_string(),
                    path: "demo/new.js".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_porcelain_skips_malformed_lines() {
        let lines = vec!["justoneword".to_string()];
        assert!(parse_porcelain(&lines).is_empty());
    }
}
