//! Project configuration: paths and the external command lines the CLI
//! drives.
//!
//! Everything has a default aimed at running `vd` from the library checkout
//! root; an optional `vexel-dev.yml` overrides individual fields. Paths are
//! tilde-expanded when read.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the project configuration file
const DEFAULT_CONFIG_PATH: &str = "./vexel-dev.yml";
/// Default path for the persisted picker selection
const DEFAULT_CACHE_PATH: &str = "./cli_output/cli_cache.json";

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_test_dir() -> String {
    "test".to_string()
}

fn default_website_dir() -> String {
    "../vexeljs.com".to_string()
}

fn default_website_package_name() -> String {
    "vexeljs.com".to_string()
}

fn default_cache_path() -> String {
    DEFAULT_CACHE_PATH.to_string()
}

fn default_bundler_command() -> Vec<String> {
    vec!["npx".to_string(), "rollup".to_string(), "-c".to_string()]
}

fn default_test_runner_command() -> Vec<String> {
    vec!["npx".to_string(), "testem".to_string()]
}

fn default_transform_command() -> Vec<String> {
    vec![
        "npm".to_string(),
        "run".to_string(),
        "transform".to_string(),
        "--".to_string(),
    ]
}

fn default_website_start_command() -> Vec<String> {
    vec![
        "npm".to_string(),
        "run".to_string(),
        "start:dev".to_string(),
    ]
}

fn default_dev_commands() -> Vec<Vec<String>> {
    vec![
        vec![
            "npm".to_string(),
            "run".to_string(),
            "build".to_string(),
            "--".to_string(),
            "-f".to_string(),
            "-w".to_string(),
        ],
        vec![
            "npm".to_string(),
            "run".to_string(),
            "build-tests".to_string(),
            "--".to_string(),
            "-w".to_string(),
        ],
    ]
}

fn default_unit_port() -> u16 {
    8080
}

fn default_visual_port() -> u16 {
    8081
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Directory holding the library sources to transform.
    pub source_dir: String,
    /// Directory holding the test suites (`unit/`, `visual/`, ...).
    pub test_dir: String,
    /// Path to the companion website checkout.
    pub website_dir: String,
    /// Expected `name` field of the website checkout's package manifest.
    pub website_package_name: String,
    /// Where the last picker selection is persisted.
    pub cache_path: String,
    /// Bundler invocation; `--watch` is appended when requested.
    pub bundler_command: Vec<String>,
    /// Test runner invocation; suite flags are appended per run.
    pub test_runner_command: Vec<String>,
    /// Transform script invocation; flags and file paths are appended.
    pub transform_command: Vec<String>,
    /// Dev server invocation, run inside the website checkout.
    pub website_start_command: Vec<String>,
    /// Watch builds kept running by `vd dev`.
    pub dev_commands: Vec<Vec<String>>,
    pub unit_port: u16,
    pub visual_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            test_dir: default_test_dir(),
            website_dir: default_website_dir(),
            website_package_name: default_website_package_name(),
            cache_path: default_cache_path(),
            bundler_command: default_bundler_command(),
            test_runner_command: default_test_runner_command(),
            transform_command: default_transform_command(),
            website_start_command: default_website_start_command(),
            dev_commands: default_dev_commands(),
            unit_port: default_unit_port(),
            visual_port: default_visual_port(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn cache_path(&self) -> String {
        shellexpand::tilde(&self.cache_path).to_string()
    }

    #[must_use]
    pub fn website_dir(&self) -> String {
        shellexpand::tilde(&self.website_dir).to_string()
    }

    #[must_use]
    pub fn source_dir(&self) -> String {
        shellexpand::tilde(&self.source_dir).to_string()
    }

    #[must_use]
    pub fn test_dir(&self) -> String {
        shellexpand::tilde(&self.test_dir).to_string()
    }
}

/// Resolves the configuration file path, preferring the given override.
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Loads the configuration, falling back to defaults when the file does not
/// exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened or parsed.
pub fn load_config(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        return Ok(Config::default());
    }

    let reader = File::open(config_path)
        .map_err(|e| Error::io_error("config", config_path, e))?;

    serde_yaml::from_reader(reader)
        .map_err(|e| Error::yaml_error("reading", "config", config_path, e))
}
