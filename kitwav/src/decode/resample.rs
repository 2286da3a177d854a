//! Rubato-based sample rate conversion.
//!
//! Whole buffers are pushed through an FFT resampler in fixed blocks. The
//! last block is zero padded, and input keeps flowing until the resampler's
//! output delay has been flushed, so the result can be cut to exactly
//! `round(duration * target_rate)` frames.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};
use tracing::debug;

use crate::error::DecodeError;
use crate::pcm::DecodedAudio;

/// Number of input frames per processing block.
const CHUNK_SIZE: usize = 1024;

/// Returns the frame count of `frames` at `src_rate` once converted to
/// `dst_rate`.
pub(crate) fn target_frames(frames: usize, src_rate: u32, dst_rate: u32) -> usize {
    (frames as f64 * dst_rate as f64 / src_rate as f64).round() as usize
}

/// Converts `audio` to `target_rate`. Equal rates return the input as is.
pub fn resample(audio: DecodedAudio, target_rate: u32) -> Result<DecodedAudio, DecodeError> {
    let src_rate = audio.sample_rate();
    if src_rate == target_rate {
        return Ok(audio);
    }
    if src_rate == 0 || target_rate == 0 {
        return Err(DecodeError::InvalidSampleRate);
    }

    let num_channels = audio.channel_count();
    let out_frames = target_frames(audio.frames(), src_rate, target_rate);
    if num_channels == 0 || out_frames == 0 {
        return Ok(DecodedAudio::new(vec![Vec::new(); num_channels], target_rate));
    }

    // Use FFT-based resampler for high quality
    let mut resampler = FftFixedInOut::<f32>::new(
        src_rate as usize,
        target_rate as usize,
        CHUNK_SIZE,
        num_channels,
    )?;
    let delay = resampler.output_delay();
    let needed = out_frames + delay;

    let input = audio.channels();
    let mut block: Vec<Vec<f32>> = vec![Vec::new(); num_channels];
    let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(needed); num_channels];
    let mut pos = 0usize;

    while output[0].len() < needed {
        let frames_needed = resampler.input_frames_next();
        for (buf, src) in block.iter_mut().zip(input) {
            buf.clear();
            let start = pos.min(src.len());
            let end = (pos + frames_needed).min(src.len());
            buf.extend_from_slice(&src[start..end]);
            // Pad input past the end of the source
            buf.resize(frames_needed, 0.0);
        }
        pos += frames_needed;

        let processed = resampler.process(&block, None)?;
        for (dst, chunk) in output.iter_mut().zip(processed) {
            dst.extend_from_slice(&chunk);
        }
    }

    for ch in &mut output {
        ch.drain(..delay);
        ch.truncate(out_frames);
    }

    debug!(
        "resampled {} Hz -> {} Hz, {} -> {} frames",
        src_rate,
        target_rate,
        audio.frames(),
        out_frames
    );
    Ok(DecodedAudio::new(output, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_frames() {
        assert_eq!(target_frames(44100, 44100, 22050), 22050);
        assert_eq!(target_frames(1, 44100, 22050), 1);
        assert_eq!(target_frames(3, 48000, 16000), 1);
        assert_eq!(target_frames(0, 48000, 16000), 0);
    }

    #[test]
    fn test_same_rate_is_noop() {
        let audio = DecodedAudio::new(vec![vec![0.1, 0.2, 0.3]], 44100);
        let out = resample(audio.clone(), 44100).unwrap();
        assert_eq!(out, audio);
    }

    #[test]
    fn test_downsample_frame_count() {
        let audio = DecodedAudio::new(vec![vec![0.0; 44100], vec![0.0; 44100]], 44100);
        let out = resample(audio, 22050).unwrap();
        assert_eq!(out.sample_rate(), 22050);
        assert_eq!(out.channel_count(), 2);
        assert_eq!(out.frames(), 22050);
    }

    #[test]
    fn test_upsample_frame_count() {
        let audio = DecodedAudio::new(vec![vec![0.0; 1600]], 16000);
        let out = resample(audio, 48000).unwrap();
        assert_eq!(out.frames(), 4800);
    }

    #[test]
    fn test_short_input() {
        let audio = DecodedAudio::new(vec![vec![0.5; 10]], 48000);
        let out = resample(audio, 44100).unwrap();
        assert_eq!(out.frames(), target_frames(10, 48000, 44100));
    }

    #[test]
    fn test_preserves_dc_level() {
        let audio = DecodedAudio::new(vec![vec![0.5; 48000]], 48000);
        let out = resample(audio, 44100).unwrap();
        let ch = out.channel(0).unwrap();
        // Away from the edges a constant signal stays constant
        let mid = ch[ch.len() / 2];
        assert!((mid - 0.5).abs() < 0.01, "mid sample {}", mid);
    }

    #[test]
    fn test_empty_input() {
        let audio = DecodedAudio::new(vec![Vec::new()], 44100);
        let out = resample(audio, 22050).unwrap();
        assert_eq!(out.frames(), 0);
        assert_eq!(out.channel_count(), 1);
        assert_eq!(out.sample_rate(), 22050);
    }

    #[test]
    fn test_zero_source_rate() {
        let audio = DecodedAudio::new(vec![vec![0.0; 4]], 0);
        assert!(matches!(resample(audio, 44100), Err(DecodeError::InvalidSampleRate)));
    }
}
