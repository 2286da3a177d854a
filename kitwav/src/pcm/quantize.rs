//! Float to PCM16 conversion.

use super::DecodedAudio;

/// Converts a sample in [-1, 1] to a signed 16-bit value.
///
/// Negative values scale by 32768 and the rest by 32767, so the closed
/// interval maps onto the full i16 range. The scaled value is truncated
/// toward zero.
#[inline]
pub fn quantize(x: f32) -> i16 {
    let x = x.clamp(-1.0, 1.0);
    if x < 0.0 {
        (x * 32768.0) as i16
    } else {
        (x * 32767.0) as i16
    }
}

/// Appends `audio` to `out` as interleaved little-endian PCM16.
pub fn interleave_pcm16(audio: &DecodedAudio, out: &mut Vec<u8>) {
    let channels = audio.channels();
    let frames = audio.frames();
    out.reserve(frames * channels.len() * 2);
    for i in 0..frames {
        for ch in channels {
            out.extend_from_slice(&quantize(ch[i]).to_le_bytes());
        }
    }
}
