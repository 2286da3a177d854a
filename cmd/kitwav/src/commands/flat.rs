//! Flat multisample export.

use std::path::PathBuf;

use clap::Args;
use kitwav::kit::KitEncoder;

use super::{check_duration, get_config, print_success, read_source};
use crate::Cli;
use crate::output::write_binary;

/// Concatenate files into one WAV, in the order given, without metadata.
#[derive(Args)]
pub struct FlatCommand {
    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Input files, in output order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output sample rate (overrides config)
    #[arg(long)]
    rate: Option<u32>,

    /// Output channels, 1 or 2 (overrides config)
    #[arg(long)]
    channels: Option<u16>,
}

impl FlatCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let format = cfg.format(self.rate, self.channels)?;

        let sources = self
            .files
            .iter()
            .map(|p| read_source(p))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let flat = KitEncoder::default().encode_flat(&sources, format)?;
        check_duration(flat.duration_secs, &cfg)?;

        write_binary(&self.output, &flat.bytes)?;
        print_success(&format!(
            "Wrote {} ({} files, {} frames, {:.2}s)",
            self.output.display(),
            sources.len(),
            flat.total_frames,
            flat.duration_secs
        ));
        Ok(())
    }
}
