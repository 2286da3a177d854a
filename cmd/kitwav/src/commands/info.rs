//! WAV header inspection.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::read_source;
use crate::Cli;
use crate::output::{OutputFormat, print_value};

/// Print WAV header information without decoding samples.
#[derive(Args)]
pub struct InfoCommand {
    /// WAV files to inspect
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct FileInfo {
    file: String,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data_bytes: u32,
    frames: u64,
    duration_secs: f64,
}

impl InfoCommand {
    pub async fn run(&self, _cli: &Cli) -> anyhow::Result<()> {
        let mut infos = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let bytes = read_source(path)?;
            let info = kitwav::parse_header(&bytes)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            infos.push(FileInfo {
                file: path.display().to_string(),
                channels: info.channels,
                sample_rate: info.sample_rate,
                bits_per_sample: info.bits_per_sample,
                data_bytes: info.data_bytes,
                frames: info.frames(),
                duration_secs: info.duration_secs,
            });
        }

        print_value(OutputFormat::from_json_flag(self.json), &infos)
    }
}
