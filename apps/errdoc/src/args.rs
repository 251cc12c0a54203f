//! # CLI Argument Definitions
//!
//! Every flag is optional; without any the tool scans `../../x` relative to the
//! working directory and writes `errors.md` into it.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// The command-line interface of the generator.
#[derive(Debug, Parser)]
#[command(name = "errdoc")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a markdown reference of registered error codes")]
pub struct Cli {
    /// Directory to scan for error declaration files [default: ../../x]
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Report location [default: <root>/errors.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file; `ERRDOC__*` environment variables override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verify the report is up to date instead of writing it
    #[arg(long)]
    pub check: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to `<DIR>/errdoc.log`
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
