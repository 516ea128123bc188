//! rankid command-line entry point

use clap::Parser;
use rankid_cli::commands::Commands;
use rankid_cli::CliResult;

/// Reciprocal-rank language identification for short, noisy text
#[derive(Debug, Parser)]
#[command(name = "rankid", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
