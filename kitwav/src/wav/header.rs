//! WAV header scanning.

use tracing::debug;

use super::{DATA_ID, FMT_ID, RIFF_ID, WAVE_ID};
use crate::error::FormatError;

/// Format and payload metadata of a WAV file, read without decoding samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample as declared by the fmt chunk.
    pub bits_per_sample: u16,
    /// Byte-exact length of the data chunk payload.
    pub data_bytes: u32,
    /// Playback duration derived from `data_bytes` and the byte rate.
    pub duration_secs: f64,
}

impl WavInfo {
    /// Returns the number of bytes per second of audio.
    pub fn byte_rate(&self) -> f64 {
        self.sample_rate as f64 * self.channels as f64 * self.bits_per_sample as f64 / 8.0
    }

    /// Returns the number of whole frames in the data chunk.
    pub fn frames(&self) -> u64 {
        let block_align = self.channels as u64 * (self.bits_per_sample as u64).div_ceil(8);
        if block_align == 0 {
            return 0;
        }
        self.data_bytes as u64 / block_align
    }
}

fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Payloads of the `fmt ` and `data` chunks found by [`scan_chunks`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChunkSpans<'a> {
    /// Last `fmt ` payload of at least 16 bytes.
    pub fmt: Option<&'a [u8]>,
    /// Last `data` payload, byte exact.
    pub data: Option<&'a [u8]>,
}

/// Checks the RIFF/WAVE magic and walks the subchunks from offset 12.
///
/// A chunk whose declared size runs past the end of the buffer ends the
/// scan; whatever was found before it is kept. Chunks are word aligned, so
/// the cursor always advances by an even amount.
pub(crate) fn scan_chunks(data: &[u8]) -> Result<ChunkSpans<'_>, FormatError> {
    if data.len() < 12 {
        return Err(FormatError::TooSmall(data.len()));
    }
    if data[0..4] != RIFF_ID {
        return Err(FormatError::NotRiff);
    }
    if data[8..12] != WAVE_ID {
        return Err(FormatError::NotWave);
    }

    let mut spans = ChunkSpans::default();
    let mut offset = 12usize;
    while offset + 8 <= data.len() {
        let id = &data[offset..offset + 4];
        let size = read_u32(data, offset + 4) as usize;
        let body = offset + 8;

        if body.saturating_add(size) > data.len() {
            debug!(
                "chunk {:?} at {} declares {} bytes past end of buffer, stopping scan",
                String::from_utf8_lossy(id),
                offset,
                size
            );
            break;
        }

        let payload = &data[body..body + size];
        if id == FMT_ID && size >= 16 {
            spans.fmt = Some(payload);
        } else if id == DATA_ID {
            spans.data = Some(payload);
        } else {
            debug!("skipping chunk {:?} ({} bytes)", String::from_utf8_lossy(id), size);
        }

        offset = body + size + (size & 1);
    }
    Ok(spans)
}

/// Parses the RIFF/WAVE header of `data`.
///
/// Only `fmt ` and `data` are read; see [`scan_chunks`] for how the walk
/// treats truncation. `data_bytes` keeps the exact declared size.
pub fn parse_header(data: &[u8]) -> Result<WavInfo, FormatError> {
    let spans = scan_chunks(data)?;

    let (channels, sample_rate, bits_per_sample) = match spans.fmt {
        Some(fmt) => (read_u16(fmt, 2), read_u32(fmt, 4), read_u16(fmt, 14)),
        None => (0, 0, 0),
    };
    let data_bytes = spans.data.map_or(0, |d| d.len() as u32);

    if channels == 0 || sample_rate == 0 || bits_per_sample == 0 || data_bytes == 0 {
        return Err(FormatError::MissingChunks);
    }

    let byte_rate = sample_rate as f64 * channels as f64 * bits_per_sample as f64 / 8.0;
    if !byte_rate.is_finite() || byte_rate <= 0.0 {
        return Err(FormatError::InvalidByteRate);
    }

    Ok(WavInfo {
        channels,
        sample_rate,
        bits_per_sample,
        data_bytes,
        duration_secs: data_bytes as f64 / byte_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    fn fmt_payload(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let mut p = Vec::new();
        p.extend_from_slice(&1u16.to_le_bytes());
        p.extend_from_slice(&channels.to_le_bytes());
        p.extend_from_slice(&sample_rate.to_le_bytes());
        p.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
        p.extend_from_slice(&block_align.to_le_bytes());
        p.extend_from_slice(&bits.to_le_bytes());
        p
    }

    fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = chunks.concat();
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(4 + body.len() as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_parse_basic() {
        let buf = riff(&[
            chunk(b"fmt ", &fmt_payload(2, 48000, 16)),
            chunk(b"data", &vec![0u8; 192000]),
        ]);
        let info = parse_header(&buf).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 48000);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.data_bytes, 192000);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
        assert_eq!(info.frames(), 48000);
        assert_eq!(info.byte_rate(), 192000.0);
    }

    #[test]
    fn test_parse_too_small() {
        assert_eq!(parse_header(b"RIFF"), Err(FormatError::TooSmall(4)));
    }

    #[test]
    fn test_parse_bad_magic() {
        assert_eq!(parse_header(b"RIFX\0\0\0\0WAVE"), Err(FormatError::NotRiff));
        assert_eq!(parse_header(b"RIFF\0\0\0\0AVI "), Err(FormatError::NotWave));
    }

    #[test]
    fn test_parse_skips_unknown_odd_chunk() {
        let buf = riff(&[
            chunk(b"junk", &[1, 2, 3]),
            chunk(b"fmt ", &fmt_payload(1, 22050, 8)),
            chunk(b"data", &[0x80; 11025]),
        ]);
        let info = parse_header(&buf).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 22050);
        assert_eq!(info.bits_per_sample, 8);
        assert_eq!(info.data_bytes, 11025);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_truncated_data_uses_earlier_chunks() {
        let mut buf = riff(&[
            chunk(b"fmt ", &fmt_payload(1, 8000, 16)),
            chunk(b"data", &[0u8; 16]),
            chunk(b"LIST", &[0u8; 8]),
        ]);
        // Corrupt the trailing LIST size so it runs past the end.
        let n = buf.len();
        buf[n - 12..n - 8].copy_from_slice(&1000u32.to_le_bytes());
        let info = parse_header(&buf).unwrap();
        assert_eq!(info.data_bytes, 16);
    }

    #[test]
    fn test_parse_truncated_before_data_fails() {
        let mut buf = riff(&[
            chunk(b"fmt ", &fmt_payload(1, 8000, 16)),
            chunk(b"data", &[0u8; 16]),
        ]);
        buf.truncate(buf.len() - 4);
        assert_eq!(parse_header(&buf), Err(FormatError::MissingChunks));
    }

    #[test]
    fn test_parse_missing_fmt() {
        let buf = riff(&[chunk(b"data", &[0u8; 4])]);
        assert_eq!(parse_header(&buf), Err(FormatError::MissingChunks));
    }

    #[test]
    fn test_parse_short_fmt_ignored() {
        let buf = riff(&[chunk(b"fmt ", &[1, 0, 1, 0]), chunk(b"data", &[0u8; 4])]);
        assert_eq!(parse_header(&buf), Err(FormatError::MissingChunks));
    }

    #[test]
    fn test_scan_chunks_returns_payloads() {
        let buf = riff(&[
            chunk(b"fmt ", &fmt_payload(1, 22050, 16)),
            chunk(b"bext", &[9; 5]),
            chunk(b"data", &[1, 2, 3]),
        ]);
        let spans = scan_chunks(&buf).unwrap();
        assert_eq!(spans.fmt, Some(&fmt_payload(1, 22050, 16)[..]));
        assert_eq!(spans.data, Some(&[1u8, 2, 3][..]));

        assert_eq!(scan_chunks(b"RIFF\0\0\0\0AVI ").unwrap_err(), FormatError::NotWave);
    }

    #[test]
    fn test_parse_empty_data() {
        let buf = riff(&[
            chunk(b"fmt ", &fmt_payload(1, 8000, 16)),
            chunk(b"data", &[]),
        ]);
        assert_eq!(parse_header(&buf), Err(FormatError::MissingChunks));
    }
}
