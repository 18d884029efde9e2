//! Showrunner CLI binary.
//!
//! - Run a scene from a scenario file and save its shot list
//! - Print a saved shot list

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_scene, show_script};

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    showrunner::telemetry::init_console_telemetry(cli.verbose)?;

    match cli.command {
        Commands::Run(args) => {
            run_scene(&args).await?;
        }

        Commands::Show { script } => {
            show_script(&script).await?;
        }
    }

    Ok(())
}
