//! Audio decoding and sample rate conversion.
//!
//! The encoders only depend on the [`AudioBackend`] capability, so any
//! platform codec can stand in for the default [`HoundBackend`].
//!
//! # Example
//!
//! ```rust
//! use kitwav::decode::{AudioBackend, HoundBackend};
//! use kitwav::pcm::DecodedAudio;
//!
//! let backend = HoundBackend::default();
//! let audio = DecodedAudio::new(vec![vec![0.0; 44100]], 44100);
//! let resampled = backend.resample(audio, 22050).unwrap();
//! assert_eq!(resampled.frames(), 22050);
//! ```

mod resample;
mod wav_decoder;

pub use resample::resample;
pub use wav_decoder::decode_wav;

use crate::error::DecodeError;
use crate::pcm::DecodedAudio;

/// Decode and resample operations required by the encoders.
///
/// Implementations must not keep decoder state between calls: any native
/// context is acquired inside a call and released before it returns, on
/// success and on failure alike.
pub trait AudioBackend: Send + Sync {
    /// Decodes an encoded file into float samples at its native rate.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError>;

    /// Converts `audio` to `target_rate`.
    ///
    /// The result has `round(duration * target_rate)` frames and the same
    /// channel count. Returns the input unchanged when the rates match.
    fn resample(&self, audio: DecodedAudio, target_rate: u32) -> Result<DecodedAudio, DecodeError>;
}

/// WAV decoding with hound and FFT resampling with rubato.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoundBackend;

impl AudioBackend for HoundBackend {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
        decode_wav(bytes)
    }

    fn resample(&self, audio: DecodedAudio, target_rate: u32) -> Result<DecodedAudio, DecodeError> {
        resample(audio, target_rate)
    }
}
