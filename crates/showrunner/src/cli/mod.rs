//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the showrunner binary.

mod commands;
mod run;
mod show;

pub use commands::{Cli, Commands, RunArgs};
pub use run::run_scene;
pub use show::show_script;
