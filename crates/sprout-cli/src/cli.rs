use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sprout",
    about = "Sprout: an in-memory git playground",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML file with engine settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file the session is loaded from and saved to after every command
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Scenario to start from when no saved state exists
    #[arg(long, global = true)]
    pub scenario: Option<String>,

    /// Author recorded on new commits
    #[arg(long, global = true)]
    pub author: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive shell (default)
    Repl,
    /// Run a single command line and exit
    Run(RunArgs),
    /// List the built-in scenarios
    Scenarios,
}

#[derive(Args)]
pub struct RunArgs {
    /// The command line, either as one quoted string or as separate words
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}
