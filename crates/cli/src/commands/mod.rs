//! Subcommand implementations: thin glue between the clap surface, the
//! picker, and the external processes the CLI drives.

pub mod build;
pub mod test;
pub mod transform;
pub mod website;
