//! Kit and flat export encoders.

use std::sync::Arc;

use tracing::{debug, info};

use super::{KitMetadata, MAX_NOTE, Region, map_regions};
use crate::decode::{AudioBackend, HoundBackend};
use crate::error::{DecodeError, KitError};
use crate::pcm::{DecodedAudio, Format, interleave_pcm16, remix};
use crate::wav;

/// An encoded source file bound to a MIDI note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitSource {
    /// MIDI note, 0..=127.
    pub note: u8,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

impl KitSource {
    /// Creates a source for `note`.
    pub fn new(note: u8, bytes: Vec<u8>) -> Self {
        Self { note, bytes }
    }
}

/// A source after decode, resample and remix.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleItem {
    /// MIDI note the sample plays at unity pitch.
    pub note: u8,
    /// Audio at the export rate and channel count.
    pub audio: DecodedAudio,
}

/// Result of a kit export.
#[derive(Debug, Clone)]
pub struct EncodedKit {
    /// The finished WAV file.
    pub bytes: Vec<u8>,
    /// Frames in the data chunk.
    pub total_frames: u64,
    /// `total_frames / sample_rate`.
    pub duration_secs: f64,
    /// Regions written to the metadata, in data order.
    pub regions: Vec<Region>,
}

/// Result of a flat export.
#[derive(Debug, Clone)]
pub struct EncodedFlat {
    /// The finished WAV file.
    pub bytes: Vec<u8>,
    /// Frames in the data chunk.
    pub total_frames: u64,
    /// `total_frames / sample_rate`.
    pub duration_secs: f64,
}

/// Builds kit and flat WAV files from encoded sources.
///
/// Both exports run every source through the same pipeline (decode,
/// resample to the export rate, remix to the export channel count) and then
/// differ in ordering and metadata:
///
/// - [`encode_kit`](Self::encode_kit) sorts by note and writes `LIST`/`smpl`
///   metadata describing one keyboard region per source
/// - [`encode_flat`](Self::encode_flat) keeps input order and writes only
///   `fmt ` and `data`
///
/// Any failure aborts the whole export.
#[derive(Debug)]
pub struct KitEncoder<B = HoundBackend> {
    backend: Arc<B>,
}

impl Default for KitEncoder<HoundBackend> {
    fn default() -> Self {
        Self::new(HoundBackend)
    }
}

impl<B> Clone for KitEncoder<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: AudioBackend> KitEncoder<B> {
    /// Creates an encoder using `backend` for decoding and resampling.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Encodes a kit from `sources`.
    ///
    /// Sources are stable-sorted by note. Sources that end up with no frames
    /// are left out of the data and get no region, but still count when the
    /// key ranges of their neighbours are computed.
    pub fn encode_kit(&self, sources: Vec<KitSource>, format: Format) -> Result<EncodedKit, KitError> {
        validate_format(format)?;
        let sources = sort_sources(sources)?;

        let mut items = Vec::with_capacity(sources.len());
        for src in &sources {
            let audio = condition(&*self.backend, &src.bytes, format)?;
            debug!(
                "note {}: {} frames ({:.3}s)",
                src.note,
                audio.frames(),
                audio.duration_secs()
            );
            items.push(SampleItem {
                note: src.note,
                audio,
            });
        }
        assemble_kit(items, format)
    }

    /// Encodes a flat multisample file, keeping the order of `sources`.
    pub fn encode_flat(&self, sources: &[Vec<u8>], format: Format) -> Result<EncodedFlat, KitError> {
        validate_format(format)?;

        let mut pcm = Vec::new();
        let mut total_frames = 0u64;
        for (i, bytes) in sources.iter().enumerate() {
            let audio = condition(&*self.backend, bytes, format)?;
            debug!(
                "source {}: {} frames ({:.3}s)",
                i,
                audio.frames(),
                audio.duration_secs()
            );
            total_frames += audio.frames() as u64;
            pcm.reserve(audio.frames() * format.frame_bytes());
            interleave_pcm16(&audio, &mut pcm);
        }

        let bytes = wav::write_flat(format, pcm)?;
        let duration_secs = format.duration_secs(total_frames);
        info!(
            "encoded flat file: {} sources, {} frames, {:.3}s",
            sources.len(),
            total_frames,
            duration_secs
        );
        Ok(EncodedFlat {
            bytes,
            total_frames,
            duration_secs,
        })
    }
}

impl<B: AudioBackend + 'static> KitEncoder<B> {
    /// Encodes a kit like [`encode_kit`](Self::encode_kit), conditioning
    /// sources concurrently on the blocking thread pool.
    ///
    /// Results are gathered by their position after sorting, so the output
    /// is identical to the sequential encoder. Dropping the future discards
    /// all partial work.
    pub async fn encode_kit_parallel(
        &self,
        sources: Vec<KitSource>,
        format: Format,
    ) -> Result<EncodedKit, KitError> {
        validate_format(format)?;
        let sources = sort_sources(sources)?;
        let notes: Vec<u8> = sources.iter().map(|s| s.note).collect();

        let tasks = sources.into_iter().map(|src| {
            let backend = Arc::clone(&self.backend);
            tokio::task::spawn_blocking(move || condition(&*backend, &src.bytes, format))
        });
        let results = futures::future::try_join_all(tasks).await?;

        let mut items = Vec::with_capacity(results.len());
        for (note, result) in notes.into_iter().zip(results) {
            let audio = result?;
            debug!(
                "note {}: {} frames ({:.3}s)",
                note,
                audio.frames(),
                audio.duration_secs()
            );
            items.push(SampleItem { note, audio });
        }
        assemble_kit(items, format)
    }
}

fn validate_format(format: Format) -> Result<(), KitError> {
    if format.sample_rate == 0 {
        return Err(KitError::InvalidSampleRate);
    }
    Ok(())
}

fn sort_sources(mut sources: Vec<KitSource>) -> Result<Vec<KitSource>, KitError> {
    if let Some(src) = sources.iter().find(|s| s.note > MAX_NOTE) {
        return Err(KitError::InvalidNote(src.note));
    }
    // Vec::sort_by_key is stable
    sources.sort_by_key(|s| s.note);
    Ok(sources)
}

/// Decodes `bytes` and brings the audio to the export rate and channel count.
fn condition<B: AudioBackend + ?Sized>(
    backend: &B,
    bytes: &[u8],
    format: Format,
) -> Result<DecodedAudio, DecodeError> {
    let audio = backend.decode(bytes)?;
    let audio = backend.resample(audio, format.sample_rate)?;
    Ok(remix(audio, format))
}

fn assemble_kit(items: Vec<SampleItem>, format: Format) -> Result<EncodedKit, KitError> {
    let notes: Vec<u8> = items.iter().map(|i| i.note).collect();
    let frame_counts: Vec<u64> = items.iter().map(|i| i.audio.frames() as u64).collect();

    let total_frames: u64 = frame_counts.iter().sum();
    let mut pcm = Vec::with_capacity(total_frames as usize * format.frame_bytes());
    for item in &items {
        if item.audio.is_empty() {
            debug!("note {} has no frames, leaving it out of the kit", item.note);
            continue;
        }
        interleave_pcm16(&item.audio, &mut pcm);
    }

    let regions = map_regions(&notes, &frame_counts);
    let meta = KitMetadata::new(regions.clone());
    let bytes = wav::write_kit(format, &meta, pcm)?;
    let duration_secs = format.duration_secs(total_frames);

    info!(
        "encoded kit: {} regions, {} frames, {:.3}s, {} bytes",
        regions.len(),
        total_frames,
        duration_secs,
        bytes.len()
    );
    Ok(EncodedKit {
        bytes,
        total_frames,
        duration_secs,
        regions,
    })
}
