//! WAV decoding with hound.

use std::borrow::Cow;
use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::DecodeError;
use crate::pcm::DecodedAudio;
use crate::wav::{self, Chunk, ChunkSpans, DATA_ID, FMT_ID};

/// Rebuilds `bytes` as a RIFF/WAVE file holding only its `fmt ` and `data`
/// chunks.
///
/// hound does not skip the pad byte after an odd-sized chunk, so every
/// other chunk is dropped before the reader sees the file. Input without
/// both chunks is returned unchanged for hound to reject.
fn keep_audio_chunks(bytes: &[u8]) -> Result<Cow<'_, [u8]>, DecodeError> {
    let (fmt, data) = match wav::scan_chunks(bytes) {
        Ok(ChunkSpans {
            fmt: Some(fmt),
            data: Some(data),
        }) => (fmt, data),
        _ => return Ok(Cow::Borrowed(bytes)),
    };

    let chunks = [
        Chunk::new(FMT_ID, fmt.to_vec()),
        Chunk::new(DATA_ID, data.to_vec()),
    ]
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .and_then(|chunks| wav::riff_envelope(&chunks))
    .map_err(|e| DecodeError::Wav(e.to_string()))?;
    Ok(Cow::Owned(chunks))
}

/// Decodes a PCM or IEEE float WAV file into per-channel float samples.
///
/// Integer samples are normalized by `2^(bits - 1)`. Chunks other than
/// `fmt ` and `data` are ignored. The reader lives only for the duration of
/// the call.
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
    let bytes = keep_audio_chunks(bytes)?;
    let reader = WavReader::new(Cursor::new(bytes.as_ref()))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(DecodeError::InvalidSampleRate);
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
    };

    let audio = DecodedAudio::from_interleaved(&samples, spec.channels as usize, spec.sample_rate);
    debug!(
        "decoded {} frames, {} channels, {} Hz, {}-bit {:?}",
        audio.frames(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );
    Ok(audio)
}
