use anyhow::Result;
use clap::Parser;

use breakup::cli::{commands, Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => commands::run(args),
        Command::Count(args) => commands::count(args),
        Command::Completions(args) => commands::completions(args),
        Command::Man => commands::man(),
    }
}
