//! Keyboard region mapping.

/// Highest MIDI note.
pub const MAX_NOTE: u8 = 127;

/// A keyboard zone bound to a span of the concatenated frame stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First frame of the sample in the data chunk.
    pub sample_start: u64,
    /// One past the last frame of the sample.
    pub sample_end: u64,
    /// Lowest key of the zone.
    pub low_key: u8,
    /// Highest key of the zone.
    pub high_key: u8,
    /// Key at which the sample plays at its recorded pitch.
    pub root_note: u8,
}

impl Region {
    /// Returns the number of frames in the region.
    pub fn frames(&self) -> u64 {
        self.sample_end - self.sample_start
    }
}

/// Computes key-range boundaries for ascending `notes`.
///
/// Starts at 0, adds the integer midpoint (upper half rounded up) of each
/// adjacent pair and ends at 127, giving `notes.len() + 1` entries. An empty
/// note list has no boundaries.
pub fn key_boundaries(notes: &[u8]) -> Vec<u8> {
    if notes.is_empty() {
        return Vec::new();
    }
    let mut bounds = Vec::with_capacity(notes.len() + 1);
    bounds.push(0);
    for pair in notes.windows(2) {
        let mid = (pair[0] as u16 + pair[1] as u16 + 1) / 2;
        bounds.push(mid as u8);
    }
    bounds.push(MAX_NOTE);
    bounds
}

/// Maps ascending `notes` and their frame counts to regions.
///
/// Frame offsets are cumulative from 0. Entries with zero frames produce no
/// region and take no frames, but their note still shapes the boundaries of
/// their neighbours.
pub fn map_regions(notes: &[u8], frame_counts: &[u64]) -> Vec<Region> {
    let bounds = key_boundaries(notes);
    let mut regions = Vec::with_capacity(notes.len());
    let mut cursor = 0u64;

    for (i, (&note, &frames)) in notes.iter().zip(frame_counts).enumerate() {
        if frames == 0 {
            continue;
        }
        regions.push(Region {
            sample_start: cursor,
            sample_end: cursor + frames,
            low_key: bounds[i],
            high_key: bounds[i + 1],
            root_note: note,
        });
        cursor += frames;
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_boundaries() {
        assert_eq!(key_boundaries(&[60, 64, 67]), vec![0, 62, 66, 127]);
        assert_eq!(key_boundaries(&[60]), vec![0, 127]);
        assert_eq!(key_boundaries(&[]), Vec::<u8>::new());
        assert_eq!(key_boundaries(&[0, 127]), vec![0, 64, 127]);
        assert_eq!(key_boundaries(&[60, 61]), vec![0, 61, 127]);
    }

    #[test]
    fn test_regions_cover_keyboard() {
        let regions = map_regions(&[60, 64, 67], &[10, 20, 30]);
        let ranges: Vec<(u8, u8)> = regions.iter().map(|r| (r.low_key, r.high_key)).collect();
        assert_eq!(ranges, vec![(0, 62), (62, 66), (66, 127)]);
        assert_eq!(regions.first().map(|r| r.low_key), Some(0));
        assert_eq!(regions.last().map(|r| r.high_key), Some(127));
        for pair in regions.windows(2) {
            assert_eq!(pair[0].high_key, pair[1].low_key);
        }
    }

    #[test]
    fn test_regions_frame_offsets() {
        let regions = map_regions(&[60, 67], &[22050, 11025]);
        assert_eq!(regions[0].sample_start, 0);
        assert_eq!(regions[0].sample_end, 22050);
        assert_eq!(regions[1].sample_start, 22050);
        assert_eq!(regions[1].sample_end, 33075);
        assert_eq!(regions[0].root_note, 60);
        assert_eq!(regions[1].root_note, 67);
        assert_eq!(regions[1].frames(), 11025);
    }

    #[test]
    fn test_zero_frame_item_skipped() {
        let regions = map_regions(&[60, 64, 67], &[100, 0, 50]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].high_key, 62);
        // The skipped note 64 still places the boundary at 66.
        assert_eq!((regions[1].low_key, regions[1].high_key), (66, 127));
        assert_eq!(regions[1].sample_start, 100);
        assert_eq!(regions[1].sample_end, 150);
    }

    #[test]
    fn test_empty() {
        assert!(map_regions(&[], &[]).is_empty());
    }
}
