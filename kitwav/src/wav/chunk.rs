//! RIFF chunk serialization.

use super::{DATA_ID, FMT_ID, INFO_ID, LIST_ID, RIFF_ID, SMPL_ID, TNGE_ID, WAVE_ID};
use crate::error::FormatError;
use crate::kit::KitMetadata;
use crate::pcm::Format;

/// PCM format tag in the fmt chunk.
const WAVE_FORMAT_PCM: u16 = 1;

/// Bits per sample of every chunk this module writes.
const BITS_PER_SAMPLE: u16 = 16;

/// MIDI unity note stored in the smpl chunk.
const SMPL_UNITY_NOTE: u32 = 60;

/// A RIFF subchunk.
///
/// Serialized as the 4-byte id, the little-endian payload length, the
/// payload and one zero pad byte when the length is odd. The size field
/// never counts the pad byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    id: [u8; 4],
    payload: Vec<u8>,
}

impl Chunk {
    /// Creates a chunk, failing if the payload does not fit a u32 size field.
    pub fn new(id: [u8; 4], payload: Vec<u8>) -> Result<Self, FormatError> {
        if u32::try_from(payload.len()).is_err() {
            return Err(FormatError::ChunkTooLarge {
                id: String::from_utf8_lossy(&id).into_owned(),
                len: payload.len(),
            });
        }
        Ok(Self { id, payload })
    }

    /// Returns the unpadded payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the number of bytes `write_to` appends.
    pub fn serialized_len(&self) -> usize {
        8 + self.payload.len() + (self.payload.len() & 1)
    }

    /// Appends the serialized chunk to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.serialized_len());
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.payload);
        if self.payload.len() % 2 == 1 {
            out.push(0);
        }
    }

    /// Returns the serialized chunk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut out);
        out
    }
}

/// Builds the 16-byte PCM `fmt ` chunk for 16-bit output in `format`.
pub fn fmt_chunk(format: Format) -> Chunk {
    let channels = format.channels() as u16;
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = format.sample_rate * block_align as u32;

    let mut p = Vec::with_capacity(16);
    p.extend_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
    p.extend_from_slice(&channels.to_le_bytes());
    p.extend_from_slice(&format.sample_rate.to_le_bytes());
    p.extend_from_slice(&byte_rate.to_le_bytes());
    p.extend_from_slice(&block_align.to_le_bytes());
    p.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    Chunk { id: FMT_ID, payload: p }
}

/// Builds the `LIST`/`INFO` chunk carrying the kit metadata as a `TNGE`
/// subchunk of NUL-terminated JSON.
pub fn info_chunk(meta: &KitMetadata) -> Result<Chunk, FormatError> {
    let mut json = serde_json::to_vec(meta)?;
    json.push(0);
    let tnge = Chunk::new(TNGE_ID, json)?;

    let mut payload = Vec::with_capacity(4 + tnge.serialized_len());
    payload.extend_from_slice(&INFO_ID);
    tnge.write_to(&mut payload);
    Chunk::new(LIST_ID, payload)
}

/// Builds the 36-byte `smpl` chunk. No loops, unity note 60.
pub fn smpl_chunk(sample_rate: u32) -> Chunk {
    let sample_period: u32 = if sample_rate == 0 {
        0
    } else {
        1_000_000_000 / sample_rate
    };

    let fields: [u32; 9] = [
        0, // manufacturer
        0, // product
        sample_period,
        SMPL_UNITY_NOTE,
        0, // pitch fraction
        0, // SMPTE format
        0, // SMPTE offset
        0, // loop count
        0, // sampler data
    ];
    let mut p = Vec::with_capacity(36);
    for f in fields {
        p.extend_from_slice(&f.to_le_bytes());
    }
    Chunk { id: SMPL_ID, payload: p }
}

/// Builds the `data` chunk from interleaved little-endian PCM16 bytes.
pub fn data_chunk(pcm: Vec<u8>) -> Result<Chunk, FormatError> {
    Chunk::new(DATA_ID, pcm)
}

/// Wraps chunks into a `RIFF....WAVE` file.
pub fn riff_envelope(chunks: &[Chunk]) -> Result<Vec<u8>, FormatError> {
    let body: usize = chunks.iter().map(Chunk::serialized_len).sum();
    let riff_size = u32::try_from(4 + body).map_err(|_| FormatError::ChunkTooLarge {
        id: "RIFF".to_string(),
        len: 4 + body,
    })?;

    let mut out = Vec::with_capacity(8 + 4 + body);
    out.extend_from_slice(&RIFF_ID);
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(&WAVE_ID);
    for chunk in chunks {
        chunk.write_to(&mut out);
    }
    Ok(out)
}

/// Writes a kit file: `fmt `, `LIST`, `smpl`, `data`.
pub fn write_kit(format: Format, meta: &KitMetadata, pcm: Vec<u8>) -> Result<Vec<u8>, FormatError> {
    riff_envelope(&[
        fmt_chunk(format),
        info_chunk(meta)?,
        smpl_chunk(format.sample_rate),
        data_chunk(pcm)?,
    ])
}

/// Writes a flat file with the canonical 44-byte header.
pub fn write_flat(format: Format, pcm: Vec<u8>) -> Result<Vec<u8>, FormatError> {
    riff_envelope(&[fmt_chunk(format), data_chunk(pcm)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::Region;
    use crate::wav::{FLAT_HEADER_LEN, parse_header};

    fn u32_at(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(buf[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_chunk_odd_payload_padded() {
        let chunk = Chunk::new(*b"abcd", vec![1, 2, 3]).unwrap();
        let bytes = chunk.to_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(chunk.serialized_len(), 12);
        assert_eq!(&bytes[0..4], b"abcd");
        assert_eq!(u32_at(&bytes, 4), 3);
        assert_eq!(&bytes[8..], &[1, 2, 3, 0]);
    }

    #[test]
    fn test_chunk_even_payload_not_padded() {
        let bytes = Chunk::new(*b"abcd", vec![1, 2]).unwrap().to_bytes();
        assert_eq!(bytes.len(), 10);
        assert_eq!(u32_at(&bytes, 4), 2);
    }

    #[test]
    fn test_fmt_chunk_layout() {
        let bytes = fmt_chunk(Format::stereo(44100)).to_bytes();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], b"fmt ");
        assert_eq!(u32_at(&bytes, 4), 16);
        assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[10], bytes[11]]), 2);
        assert_eq!(u32_at(&bytes, 12), 44100);
        assert_eq!(u32_at(&bytes, 16), 44100 * 4);
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 4);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 16);
    }

    #[test]
    fn test_smpl_chunk_layout() {
        let bytes = smpl_chunk(44100).to_bytes();
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[0..4], b"smpl");
        assert_eq!(u32_at(&bytes, 4), 36);
        assert_eq!(u32_at(&bytes, 8), 0);
        assert_eq!(u32_at(&bytes, 16), 22675);
        assert_eq!(u32_at(&bytes, 20), 60);
        assert!(bytes[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_smpl_chunk_zero_rate() {
        let bytes = smpl_chunk(0).to_bytes();
        assert_eq!(u32_at(&bytes, 16), 0);
    }

    #[test]
    fn test_info_chunk_layout() {
        let meta = KitMetadata::new(vec![Region {
            sample_start: 0,
            sample_end: 100,
            low_key: 0,
            high_key: 127,
            root_note: 60,
        }]);
        let chunk = info_chunk(&meta).unwrap();
        let bytes = chunk.to_bytes();

        assert_eq!(&bytes[0..4], b"LIST");
        let list_len = u32_at(&bytes, 4) as usize;
        assert_eq!(list_len % 2, 0);
        assert_eq!(list_len, chunk.payload().len());
        assert_eq!(&bytes[8..12], b"INFO");
        assert_eq!(&bytes[12..16], b"TNGE");

        let json_len = u32_at(&bytes, 16) as usize;
        let json = &bytes[20..20 + json_len];
        assert_eq!(json.last(), Some(&0));
        let value: serde_json::Value = serde_json::from_slice(&json[..json_len - 1]).unwrap();
        assert_eq!(value["regions"][0]["sample.end"], 100);
        assert_eq!(value["regions"][0]["loop.start"], -1);
    }

    #[test]
    fn test_data_chunk_odd() {
        let bytes = data_chunk(vec![7; 5]).unwrap().to_bytes();
        assert_eq!(u32_at(&bytes, 4), 5);
        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[13], 0);
    }

    #[test]
    fn test_riff_envelope_size() {
        let chunks = [
            Chunk::new(*b"aaaa", vec![1]).unwrap(),
            Chunk::new(*b"bbbb", vec![1, 2]).unwrap(),
        ];
        let bytes = riff_envelope(&chunks).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(u32_at(&bytes, 4) as usize, 4 + 10 + 10);
        assert_eq!(bytes.len(), 8 + 4 + 10 + 10);
    }

    #[test]
    fn test_write_flat_header() {
        let pcm = vec![0u8; 400];
        let bytes = write_flat(Format::mono(8000), pcm).unwrap();
        assert_eq!(bytes.len(), FLAT_HEADER_LEN + 400);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 400);

        let info = parse_header(&bytes).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.bits_per_sample, 16);
        assert!((info.duration_secs - 0.025).abs() < 1e-9);
    }

    #[test]
    fn test_write_kit_chunk_order() {
        let meta = KitMetadata::new(Vec::new());
        let bytes = write_kit(Format::mono(22050), &meta, vec![0u8; 8]).unwrap();

        assert_eq!(&bytes[12..16], b"fmt ");
        let list_at = 12 + 24;
        assert_eq!(&bytes[list_at..list_at + 4], b"LIST");
        let list_len = u32_at(&bytes, list_at + 4) as usize;
        let smpl_at = list_at + 8 + list_len;
        assert_eq!(&bytes[smpl_at..smpl_at + 4], b"smpl");
        let data_at = smpl_at + 44;
        assert_eq!(&bytes[data_at..data_at + 4], b"data");
        assert_eq!(bytes.len(), data_at + 8 + 8);
        assert_eq!(u32_at(&bytes, 4) as usize, bytes.len() - 8);
    }
}
