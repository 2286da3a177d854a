//! kitwav - build multisample kit WAV files for hardware samplers.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{ConfigCommand, FlatCommand, InfoCommand, KitCommand};

/// kitwav - build multisample kit WAV files.
///
/// This tool:
///   - inspects WAV headers
///   - packs WAV files bound to MIDI notes into one kit file with keyboard
///     region metadata
///   - concatenates WAV files into one flat multisample file
///
/// Defaults are read from ~/.kitwav/config.yaml.
#[derive(Parser)]
#[command(name = "kitwav")]
#[command(about = "Multisample kit WAV builder")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.kitwav/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or create the configuration file
    Config(ConfigCommand),
    /// Print WAV header information
    Info(InfoCommand),
    /// Build a kit from NOTE=FILE pairs
    Kit(KitCommand),
    /// Concatenate files into a flat multisample WAV
    Flat(FlatCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli).await,
        Commands::Info(cmd) => cmd.run(&cli).await,
        Commands::Kit(cmd) => cmd.run(&cli).await,
        Commands::Flat(cmd) => cmd.run(&cli).await,
    }
}
