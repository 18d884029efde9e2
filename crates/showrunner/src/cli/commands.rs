//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Showrunner - multi-agent scene simulation that writes shot lists
#[derive(Parser, Debug)]
#[command(name = "showrunner")]
#[command(about = "Multi-agent scene simulation that writes shot lists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scene from a scenario file
    Run(RunArgs),

    /// Print a saved shot list
    Show {
        /// Path to a shot list record
        #[arg(long, default_value = "script.json")]
        script: PathBuf,
    },
}

/// Options for `run`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Path to the scenario TOML file
    #[arg(long)]
    pub scenario: PathBuf,

    /// Number of turns, overriding the scenario
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Opening narrative, overriding the scenario
    #[arg(long)]
    pub narrative: Option<String>,

    /// Pause after every turn and read an observation from stdin
    #[arg(long)]
    pub interactive: bool,

    /// Rewrite image prompts through the scenario's image helper before saving
    #[arg(long)]
    pub augment_prompts: bool,

    /// Where to write the shot list record
    #[arg(long, default_value = "script.json")]
    pub output: PathBuf,

    /// Where to write the scene log, if anywhere
    #[arg(long)]
    pub scene_log: Option<PathBuf>,
}
