use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "breakup")]
#[command(about = "NASA standard breakup model for on-orbit fragmentation events")]
#[command(version)]
#[command(after_help = "\
Examples:
  breakup run --config sim.toml --satellites sats.toml
  breakup run --config sim.toml --satellites sats.toml --seed 42 --output json
  breakup count --config sim.toml --satellites sats.toml")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a breakup and print the debris-cloud summary
    #[command(after_help = "\
Examples:
  breakup run --config sim.toml --satellites sats.toml
  breakup run --config sim.toml --satellites sats.toml --seed 42
  breakup run --config sim.toml --satellites sats.toml --parallel
  breakup run --config sim.toml --satellites sats.toml --export debris.json")]
    Run(RunArgs),

    /// Resolve the event and print the fragment count without sampling
    #[command(after_help = "\
Examples:
  breakup count --config sim.toml --satellites sats.toml")]
    Count(CountArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Render the manual page to stdout
    Man,
}

#[derive(Args)]
pub struct RunArgs {
    /// Simulation configuration TOML file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Satellite definitions TOML file
    #[arg(short, long)]
    pub satellites: PathBuf,

    /// RNG seed; omit for an entropy-seeded run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shard fragment sampling across worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: RunOutputFormat,

    /// Write the full [N, 7, 3] debris tensor to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RunOutputFormat {
    /// Boxed human-readable summary
    Pretty,
    /// JSON summary on stdout
    Json,
}

#[derive(Args)]
pub struct CountArgs {
    /// Simulation configuration TOML file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Satellite definitions TOML file
    #[arg(short, long)]
    pub satellites: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
