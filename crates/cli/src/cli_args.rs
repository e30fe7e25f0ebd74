//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate. The subcommand bodies live in [`crate::commands`].

use std::fmt::{Display, Formatter};

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for the vexel-dev CLI tool.
///
/// The `vd` binary drives builds, test runs and the companion website
/// export for the vexel graphics library.
#[derive(Parser, Debug)]
#[command(name = "vd", about = "vexel DEV CLI tools", version)]
pub struct Args {
    /// Path to the project configuration YAML.
    ///
    /// If not provided, defaults to `./vexel-dev.yml`; a missing file means
    /// built-in defaults.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Build the distribution bundle.
    Build(BuildArgs),
    /// Run the test suites.
    Test(TestArgs),
    /// Transform source files into es modules.
    Transform(TransformArgs),
    /// Companion website commands.
    Website {
        #[command(subcommand)]
        command: WebsiteCommand,
    },
    /// Start the website dev server and watch for changes.
    Start,
    /// Watch `src` and `test` and rebuild on change.
    Dev,
}

#[derive(Subcommand, Debug)]
pub enum WebsiteCommand {
    /// Start the website dev server.
    Start,
    /// Export files to the website checkout.
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Skip minifying.
    #[arg(long, short = 'f', action)]
    pub fast: bool,

    /// Keep the bundler running and rebuild on change.
    #[arg(long, short = 'w', action)]
    pub watch: bool,

    /// Specify the build input path.
    #[arg(long, short = 'i')]
    pub input: Option<String>,

    /// Specify the build output path.
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// A test suite name; doubles as the group name in the picker catalog.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    Unit,
    Visual,
}

impl Suite {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Visual => "visual",
        }
    }
}

impl Display for Suite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser/runtime context handed to the test runner.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestContext {
    Node,
    Chrome,
    Firefox,
}

impl TestContext {
    /// The runner expects capitalized launcher names.
    #[must_use]
    pub fn launcher_name(self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
        }
    }
}

#[derive(clap::Args, Debug)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct TestArgs {
    /// Test suite to run; repeatable. Without this (or --file), interactive
    /// selection is used.
    #[arg(long, short = 's')]
    pub suite: Vec<Suite>,

    /// Run a specific test file, e.g. `unit/canvas.js`.
    #[arg(long, short = 'f')]
    pub file: Option<String>,

    /// Filter tests by name.
    #[arg(long)]
    pub filter: Option<String>,

    /// Run all tests.
    #[arg(long, short = 'a', action)]
    pub all: bool,

    /// Debug visual tests by overriding refs (golden images) in case of
    /// visual changes.
    #[arg(long, short = 'd', action)]
    pub debug: bool,

    /// Recreate visual refs (golden images).
    #[arg(long, short = 'r', action)]
    pub recreate: bool,

    /// Log passing tests.
    #[arg(long, short = 'v', action)]
    pub verbose: bool,

    /// Launch tests in the browser.
    #[arg(long, short = 'l', action)]
    pub launch: bool,

    /// Run the test runner in dev mode, without the `ci` flag.
    #[arg(long, action)]
    pub dev: bool,

    /// Context to test in; repeatable.
    #[arg(long = "context", short = 'C', default_values = ["node"])]
    pub contexts: Vec<TestContext>,

    /// Port for the test server (defaults per suite).
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Path to report test results to.
    #[arg(long, short = 'o')]
    pub out: Option<String>,

    /// Clear the persisted interactive selection before running.
    #[arg(long, action)]
    pub clear_cache: bool,
}

#[derive(clap::Args, Debug)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct TransformArgs {
    /// Overwrite existing files.
    #[arg(long, short = 'o', action)]
    pub overwrite: bool,

    /// Do not use exports.
    #[arg(long = "no-exports", short = 'x', action)]
    pub no_exports: bool,

    /// Create index files.
    #[arg(long, short = 'i', action)]
    pub index: bool,

    /// Transform into typescript.
    #[arg(long, short = 't', action)]
    pub typescript: bool,

    /// Verbose logging.
    #[arg(long, short = 'v', action)]
    pub verbose: bool,

    /// Transform all files, skipping selection.
    #[arg(long, short = 'a', action)]
    pub all: bool,

    /// Compare against the given branch and transform all files with a
    /// diff.
    #[arg(long, short = 'd')]
    pub diff: Option<String>,
}

/// What a website export includes.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncludeTarget {
    Build,
    Tests,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// What to export; repeatable. Defaults to everything.
    #[arg(long, short = 'i')]
    pub include: Vec<IncludeTarget>,

    /// Keep watching and re-export on change.
    #[arg(long, short = 'w', action)]
    pub watch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_args() {
        let args = Args::parse_from(["vd", "build", "-f", "-w", "-o", "dist/vexel.js"]);
        match args.command {
            CliCommand::Build(build) => {
                assert!(build.fast);
                assert!(build.watch);
                assert_eq!(build.output, Some("dist/vexel.js".to_string()));
                assert!(build.input.is_none());
            }
            _ => panic!("Expected build subcommand"),
        }
    }

    #[test]
    fn test_test_args_defaults() {
        let args = Args::parse_from(["vd", "test"]);
        match args.command {
            CliCommand::Test(test) => {
                assert!(test.suite.is_empty());
                assert!(test.file.is_none());
                assert!(!test.all);
                assert!(!test.dev);
                assert_eq!(test.contexts, vec![TestContext::Node]);
                assert!(test.port.is_none());
                assert!(!test.clear_cache);
            }
            _ => panic!("Expected test subcommand"),
        }
    }

    #[test]
    fn test_test_args_suites() {
        let args = Args::parse_from(["vd", "test", "-s", "unit", "-s", "visual", "--dev"]);
        match args.command {
            CliCommand::Test(test) => {
                assert_eq!(test.suite, vec![Suite::Unit, Suite::Visual]);
                assert!(test.dev);
            }
            _ => panic!("Expected test subcommand"),
        }
    }

    #[test]
    fn test_test_args_rejects_unknown_suite() {
        assert!(Args::try_parse_from(["vd", "test", "-s", "integration"]).is_err());
    }

    #[test]
    fn test_transform_args() {
        let args = Args::parse_from(["vd", "transform", "--no-exports", "-t", "-d", "main"]);
        match args.command {
            CliCommand::Transform(transform) => {
                assert!(transform.no_exports);
                assert!(transform.typescript);
                assert_eq!(transform.diff, Some("main".to_string()));
                assert!(!transform.all);
            }
            _ => panic!("Expected transform subcommand"),
        }
    }

    #[test]
    fn test_website_export_args() {
        let args = Args::parse_from(["vd", "website", "export", "-i", "tests", "-w"]);
        match args.command {
            CliCommand::Website {
                command: WebsiteCommand::Export(export),
            } => {
                assert_eq!(export.include, vec![IncludeTarget::Tests]);
                assert!(export.watch);
            }
            _ => panic!("Expected website export subcommand"),
        }
    }

    #[test]
    fn test_global_config_path_flag() {
        let args = Args::parse_from(["vd", "test", "-c", "/tmp/custom.yml"]);
        assert_eq!(args.config_path, Some("/tmp/custom.yml".to_string()));
    }

    #[test]
    fn test_suite_and_context_names() {
        assert_eq!(Suite::Unit.as_str(), "unit");
        assert_eq!(format!("{}", Suite::Visual), "visual");
        assert_eq!(TestContext::Chrome.launcher_name(), "Chrome");
    }
}
