//! Configuration commands.

use clap::{Args, Subcommand};

use super::print_success;
use crate::Cli;
use crate::config::Config;
use crate::output::{OutputFormat, print_value};

/// Show or create the configuration file.
///
/// Configuration is stored in ~/.kitwav/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::Show { json } => {
                let path = Config::resolve_path(cli.config.as_deref())?;
                let cfg = Config::load(&path)?;
                eprintln!("# {}", path.display());
                print_value(OutputFormat::from_json_flag(*json), &cfg)
            }

            ConfigSubcommand::Init { force } => {
                let path = Config::resolve_path(cli.config.as_deref())?;
                if path.exists() && !force {
                    anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
                }
                Config::default().save(&path)?;
                print_success(&format!("Wrote {}", path.display()));
                Ok(())
            }
        }
    }
}
