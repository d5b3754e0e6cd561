//! Senoide CLI - sinusoidal analysis-resynthesis from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "senoide")]
#[command(author, version, about = "Sinusoidal analysis-resynthesis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose an audio file into tracked partials and resynthesize it
    Process(commands::process::ProcessArgs),

    /// Show WAV file metadata
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
