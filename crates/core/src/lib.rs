//! Vexel Dev Core Library
//!
//! This crate provides the core functionality for vexel-dev, the developer
//! CLI of the vexel client-side graphics library. It holds the data model of
//! the grouped multi-select picker (catalog, selection, persisted cache) and
//! the glue the CLI commands are built from: configuration, process
//! execution, git queries and the website export.
//!
//! # Key Features
//!
//! - **Candidate Catalog**: ordered groups of selectable files and live
//!   resolution of committed selections
//! - **Selection State**: ordered entry set enforcing the group/item
//!   mutual-exclusion rule
//! - **Selection Cache**: last committed selection persisted as indented
//!   JSON, degrading to empty on any read failure
//! - **Process Glue**: configured external commands spawned with inherited
//!   stdio and extra environment
//! - **Website Export**: recursive copies into the companion website
//!   checkout, with a debounced watch loop
//!
//! # Examples
//!
//! Resolving a committed selection against the current catalog:
//!
//! ```
//! use vexel_dev_core::catalog::Catalog;
//! use vexel_dev_core::selection::{Selection, SelectionEntry};
//!
//! let catalog = Catalog::from_groups(vec![
//!     ("unit".to_string(), vec!["a.js".to_string(), "b.js".to_string()]),
//! ]);
//! let mut selection = Selection::new();
//! selection.toggle(SelectionEntry::group_marker("unit"));
//!
//! assert_eq!(catalog.resolve(&selection).len(), 2);
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod execution;
pub mod export;
pub mod git;
pub mod selection;
