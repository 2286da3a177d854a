//! Kit export.

use std::path::PathBuf;

use clap::Args;
use kitwav::kit::{KitEncoder, KitSource};
use kitwav::note::{note_name, parse_note};
use serde::Serialize;
use tracing::info;

use super::{check_duration, get_config, print_success, read_source};
use crate::Cli;
use crate::output::{OutputFormat, print_value, write_binary};

/// Build a kit WAV with one keyboard region per sample.
///
/// Samples are given as NOTE=FILE, where NOTE is a MIDI number (60) or a
/// note name (C4, F#3, Bb2). Regions are laid out in ascending note order
/// and key ranges split halfway between neighbouring notes.
#[derive(Args)]
pub struct KitCommand {
    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Samples as NOTE=FILE
    #[arg(required = true, value_name = "NOTE=FILE")]
    samples: Vec<String>,

    /// Output sample rate (overrides config)
    #[arg(long)]
    rate: Option<u32>,

    /// Output channels, 1 or 2 (overrides config)
    #[arg(long)]
    channels: Option<u16>,

    /// Decode samples concurrently (overrides config)
    #[arg(long)]
    parallel: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RegionSummary {
    note: u8,
    name: String,
    low_key: u8,
    high_key: u8,
    sample_start: u64,
    sample_end: u64,
}

#[derive(Debug, Serialize)]
struct KitSummary {
    output: String,
    bytes: usize,
    frames: u64,
    duration_secs: f64,
    regions: Vec<RegionSummary>,
}

/// Splits `NOTE=FILE` into its note and path.
fn parse_sample_arg(arg: &str) -> anyhow::Result<(u8, PathBuf)> {
    let (note, file) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected NOTE=FILE, got {:?}", arg))?;
    if file.is_empty() {
        anyhow::bail!("missing file in {:?}", arg);
    }
    let note = parse_note(note)?;
    Ok((note, PathBuf::from(file)))
}

impl KitCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let format = cfg.format(self.rate, self.channels)?;

        let mut sources = Vec::with_capacity(self.samples.len());
        for arg in &self.samples {
            let (note, path) = parse_sample_arg(arg)?;
            info!("{} -> {}", note_name(note), path.display());
            sources.push(KitSource::new(note, read_source(&path)?));
        }

        let encoder = KitEncoder::default();
        let kit = if self.parallel || cfg.parallel {
            encoder.encode_kit_parallel(sources, format).await?
        } else {
            encoder.encode_kit(sources, format)?
        };
        check_duration(kit.duration_secs, &cfg)?;

        write_binary(&self.output, &kit.bytes)?;
        print_success(&format!(
            "Wrote {} ({} regions, {:.2}s)",
            self.output.display(),
            kit.regions.len(),
            kit.duration_secs
        ));

        let summary = KitSummary {
            output: self.output.display().to_string(),
            bytes: kit.bytes.len(),
            frames: kit.total_frames,
            duration_secs: kit.duration_secs,
            regions: kit
                .regions
                .iter()
                .map(|r| RegionSummary {
                    note: r.root_note,
                    name: note_name(r.root_note),
                    low_key: r.low_key,
                    high_key: r.high_key,
                    sample_start: r.sample_start,
                    sample_end: r.sample_end,
                })
                .collect(),
        };
        print_value(OutputFormat::from_json_flag(self.json), &summary)
    }
}
