//! WLData CLI - Command-line access to serialized game data

pub mod commands;
pub mod progress;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use commands::Commands;
use tracing::Level;

use crate::config::Config;
use crate::error::Error;

#[derive(Parser)]
#[command(name = "wldata")]
#[command(about = "WLData: inspect serialized Wonderlands game data", long_about = None)]
#[command(version = crate::VERSION)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Log level for the given `-v` count and `-q` flag
#[must_use]
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr log subscriber
pub fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print the boxed diagnostic for errors that carry one
///
/// The whole source chain is searched, so wrapping crates' errors are
/// recognized too. Returns whether anything was printed; the error itself is
/// still left to the caller to report.
pub fn report_error(err: &anyhow::Error, config_file: Option<&Path>) -> bool {
    let default_config = Config::default_path().ok();
    match err.chain().find_map(|cause| cause.downcast_ref::<Error>()) {
        Some(Error::SerializerNotFound { path }) => {
            progress::print_serializer_missing(path, config_file.or(default_config.as_deref()));
            true
        }
        _ => false,
    }
}

/// Run the WLData CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose, cli.quiet));

    let result = cli.command.execute(cli.config.as_deref());
    if let Err(err) = &result {
        report_error(err, cli.config.as_deref());
    }
    result
}
