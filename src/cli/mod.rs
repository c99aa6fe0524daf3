//! Command-line interface for the breakup binary.

mod args;
pub mod commands;

pub use args::{Cli, Command, CompletionsArgs, CountArgs, RunArgs, RunOutputFormat};
