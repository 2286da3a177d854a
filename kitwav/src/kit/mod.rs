//! Multisample kit assembly.
//!
//! # Key Types
//!
//! - [`KitEncoder`]: runs sources through decode, resample and remix, then
//!   writes a kit or flat WAV file
//! - [`Region`]: one keyboard zone of a kit
//! - [`KitMetadata`]: the `TNGE` JSON document stored in the `LIST` chunk

mod encoder;
mod metadata;
mod region;

pub use encoder::{EncodedFlat, EncodedKit, KitEncoder, KitSource, SampleItem};
pub use metadata::{KitMetadata, NO_LOOP, RegionMetadata};
pub use region::{MAX_NOTE, Region, key_boundaries, map_regions};
