//! Multisample kit WAV encoding.
//!
//! This crate turns a set of WAV files bound to MIDI notes into a single
//! "kit" WAV file for a hardware sampler:
//!
//! - `wav`: RIFF/WAVE header parsing and chunk serialization
//! - `pcm`: export format, channel remixing and 16-bit quantization
//! - `decode`: the decode/resample capability and its hound + rubato backend
//! - `kit`: keyboard region mapping, `TNGE` metadata and the encoders
//! - `note`: MIDI note names
//!
//! # Example
//!
//! ```rust,no_run
//! use kitwav::kit::{KitEncoder, KitSource};
//! use kitwav::pcm::Format;
//!
//! # fn main() -> Result<(), kitwav::KitError> {
//! let kick = std::fs::read("kick.wav").unwrap();
//! let snare = std::fs::read("snare.wav").unwrap();
//!
//! let encoder = KitEncoder::default();
//! let kit = encoder.encode_kit(
//!     vec![KitSource::new(36, kick), KitSource::new(38, snare)],
//!     Format::MONO_44K,
//! )?;
//! println!("{} bytes, {:.2}s", kit.bytes.len(), kit.duration_secs);
//! # Ok(())
//! # }
//! ```

pub mod decode;
mod error;
pub mod kit;
pub mod note;
pub mod pcm;
pub mod wav;

pub use error::{DecodeError, FormatError, KitError};
pub use pcm::Format;
pub use wav::{WavInfo, parse_header};
