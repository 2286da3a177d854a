//! PCM conditioning.
//!
//! # Key Types
//!
//! - [`Format`]: export sample rate and mono/stereo choice
//! - [`DecodedAudio`]: per-channel float samples at a sample rate
//!
//! [`remix`] maps any channel layout to the export's channel count and
//! [`quantize`] converts float samples to PCM16.

mod audio;
mod format;
mod quantize;
mod remix;

pub use audio::DecodedAudio;
pub use format::Format;
pub use quantize::{interleave_pcm16, quantize};
pub use remix::remix;
