//! Vexel Dev CLI Library
//!
//! This crate provides the command-line interface for vexel-dev, the
//! developer CLI of the vexel client-side graphics library. It drives
//! bundler builds, test runs, source transformation and the companion
//! website export, and houses the interactive grouped multi-select picker
//! the `test` and `transform` commands share.
//!
//! # Architecture
//!
//! - [`cli_args`]: clap argument parsing and the subcommand tree
//! - [`picker`]: the interactive grouped multi-select picker (fuzzy filter,
//!   query engine, crossterm interaction loop)
//! - [`commands`]: one module per subcommand, gluing catalogs, the picker,
//!   the selection cache and external processes together
//!
//! # Examples
//!
//! The CLI binary (`vd`) is used from the library checkout root:
//!
//! ```bash
//! # Interactive test selection, seeded with the previous run's choice
//! vd test
//!
//! # Run a whole suite headlessly
//! vd test -s visual
//!
//! # Pick source files to transform
//! vd transform -t
//!
//! # Export build and tests to the website checkout and keep watching
//! vd website export -w
//! ```

pub mod cli_args;
pub mod commands;
pub mod picker;
