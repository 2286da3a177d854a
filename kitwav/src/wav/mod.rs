//! RIFF/WAVE container handling.
//!
//! # Key Types
//!
//! - [`WavInfo`]: format and payload length read from a WAV header
//! - [`Chunk`]: a tagged, length-prefixed, word-aligned RIFF subchunk
//!
//! Parsing only looks at `fmt ` and `data`; every other chunk is skipped.
//! Writing produces exactly the chunks a kit or flat export needs.

mod chunk;
mod header;

pub use chunk::{
    Chunk, data_chunk, fmt_chunk, info_chunk, riff_envelope, smpl_chunk, write_flat, write_kit,
};
pub(crate) use header::{ChunkSpans, scan_chunks};
pub use header::{WavInfo, parse_header};

/// The FourCC identifier for RIFF.
pub const RIFF_ID: [u8; 4] = *b"RIFF";

/// The FourCC identifier for the WAVE form type.
pub const WAVE_ID: [u8; 4] = *b"WAVE";

/// The FourCC identifier for the fmt chunk.
pub const FMT_ID: [u8; 4] = *b"fmt ";

/// The FourCC identifier for the data chunk.
pub const DATA_ID: [u8; 4] = *b"data";

/// The FourCC identifier for the LIST chunk.
pub const LIST_ID: [u8; 4] = *b"LIST";

/// The LIST form type carrying the kit metadata.
pub const INFO_ID: [u8; 4] = *b"INFO";

/// The FourCC identifier for the kit metadata subchunk.
pub const TNGE_ID: [u8; 4] = *b"TNGE";

/// The FourCC identifier for the sampler chunk.
pub const SMPL_ID: [u8; 4] = *b"smpl";

/// Size of the canonical header preceding PCM data in a flat export.
pub const FLAT_HEADER_LEN: usize = 44;
