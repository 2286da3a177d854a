//! Export format.

/// Output format of an export.
///
/// Samples are always written as 16-bit signed integers, so the format only
/// varies in sample rate and in mono versus stereo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Creates a mono format with the given sample rate.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: false }
    }

    /// Creates a stereo format with the given sample rate.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: true }
    }

    /// Creates a format from a channel count, which must be 1 or 2.
    pub fn with_channels(sample_rate: u32, channels: u16) -> Option<Self> {
        match channels {
            1 => Some(Self::mono(sample_rate)),
            2 => Some(Self::stereo(sample_rate)),
            _ => None,
        }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub fn channels(&self) -> u32 {
        if self.stereo { 2 } else { 1 }
    }

    /// Returns the number of bytes per PCM16 frame.
    pub fn frame_bytes(&self) -> usize {
        if self.stereo { 4 } else { 2 }
    }

    /// Returns the duration in seconds of `frames` frames.
    pub fn duration_secs(&self, frames: u64) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        frames as f64 / self.sample_rate as f64
    }
}

// Common format presets
impl Format {
    /// 22.05kHz mono
    pub const MONO_22K: Format = Format::mono(22050);
    /// 44.1kHz mono (CD quality mono)
    pub const MONO_44K: Format = Format::mono(44100);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}
