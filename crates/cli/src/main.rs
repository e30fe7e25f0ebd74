use std::process::ExitCode;

use clap::Parser;
use log::debug;

use vexel_dev_core::config;
use vexel_dev_core::error::Result;

use crate::cli_args::{Args, CliCommand, WebsiteCommand};

mod cli_args;
mod commands;
pub mod picker;

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");
    let config = config::load_config(&config_path)?;

    match &args.command {
        CliCommand::Build(build_args) => commands::build::run(&config, build_args),
        CliCommand::Test(test_args) => commands::test::run(&config, test_args),
        CliCommand::Transform(transform_args) => commands::transform::run(&config, transform_args),
        CliCommand::Website { command } => match command {
            WebsiteCommand::Start => commands::website::run_start(&config),
            WebsiteCommand::Export(export_args) => commands::website::run_export(&config, export_args),
        },
        CliCommand::Start => commands::website::run_start(&config),
        CliCommand::Dev => commands::build::run_dev(&config),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
