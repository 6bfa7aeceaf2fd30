use std::path::PathBuf;

use clap::{ArgAction, Parser};

mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(name = "timesaver")]
#[command(about = "Plan Wonderlands timing speedups", long_about = None)]
#[command(version)]
struct Cli {
    /// WLData config file to use instead of the platform default
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print tweaks as JSON lines instead of tab-separated text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    wldata::cli::init_logging(wldata::cli::log_level(cli.verbose, cli.quiet));

    let result = run(&cli);
    if let Err(err) = &result {
        wldata::cli::report_error(err, cli.config.as_deref());
    }
    result
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut data = wldata::cli::commands::execute::open_data(cli.config.as_deref())?;
    let tweaks = cli.command.execute(&mut data)?;
    commands::print_tweaks(&tweaks, cli.json)
}
