#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stdout)]

pub mod args;
pub mod handlers;

use crate::args::Cli;
use anyhow::Result;
use clap::Parser;
use errdoc_core::load_config;
use errdoc_logger::Logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("❌ {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut logger = Logger::builder(env!("CARGO_PKG_NAME"))
        .level(Logger::level_for_verbosity(cli.verbose));
    if let Some(dir) = cli.log_dir {
        logger = logger.file(dir);
    }
    let _logger = logger.init()?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.root = root;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    tracing::debug!(?config, "Effective configuration");

    if cli.check { handlers::check_report(&config) } else { handlers::generate_report(&config) }
}
