//! `TNGE` kit metadata.
//!
//! The JSON layout is read by the sampler firmware: key names, key order
//! and the `-1` no-loop sentinels must stay exactly as declared here.

use serde::{Deserialize, Serialize};

use super::Region;

/// Loop point value meaning "no loop".
pub const NO_LOOP: i64 = -1;

/// Top-level `TNGE` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitMetadata {
    #[serde(rename = "sound.playmode")]
    pub playmode: String,
    #[serde(rename = "sound.rootnote")]
    pub root_note: u8,
    #[serde(rename = "sound.pitch")]
    pub pitch: i32,
    #[serde(rename = "sound.pan")]
    pub pan: i32,
    #[serde(rename = "sound.amplitude")]
    pub amplitude: u32,
    #[serde(rename = "envelope.attack")]
    pub attack: u32,
    #[serde(rename = "envelope.release")]
    pub release: u32,
    #[serde(rename = "time.mode")]
    pub time_mode: String,
    #[serde(rename = "sample.mode")]
    pub sample_mode: String,
    pub regions: Vec<RegionMetadata>,
}

/// One entry of the `regions` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMetadata {
    #[serde(rename = "sample.start")]
    pub sample_start: u64,
    #[serde(rename = "sample.end")]
    pub sample_end: u64,
    #[serde(rename = "key.low")]
    pub low_key: u8,
    #[serde(rename = "key.high")]
    pub high_key: u8,
    #[serde(rename = "pitch.keycenter")]
    pub root_note: u8,
    #[serde(rename = "loop.start")]
    pub loop_start: i64,
    #[serde(rename = "loop.end")]
    pub loop_end: i64,
}

impl From<&Region> for RegionMetadata {
    fn from(r: &Region) -> Self {
        Self {
            sample_start: r.sample_start,
            sample_end: r.sample_end,
            low_key: r.low_key,
            high_key: r.high_key,
            root_note: r.root_note,
            loop_start: NO_LOOP,
            loop_end: NO_LOOP,
        }
    }
}

impl KitMetadata {
    /// Creates metadata with the fixed kit defaults for `regions`.
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            playmode: "poly".to_string(),
            root_note: 60,
            pitch: 0,
            pan: 0,
            amplitude: 100,
            attack: 0,
            release: 0,
            time_mode: "off".to_string(),
            sample_mode: "multi".to_string(),
            regions: regions.iter().map(RegionMetadata::from).collect(),
        }
    }
}
