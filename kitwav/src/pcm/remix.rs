//! Channel remixing to mono or stereo.

use super::{DecodedAudio, Format};

/// Remixes `audio` to the channel count of `format`, keeping the frame count.
///
/// - mono output is the per-frame mean of every source channel
/// - stereo from mono duplicates the source channel
/// - stereo from two or more channels keeps channels 0 and 1
///
/// Never fails; a buffer without channels yields silent empty channels.
pub fn remix(audio: DecodedAudio, format: Format) -> DecodedAudio {
    let sample_rate = audio.sample_rate();
    let frames = audio.frames();
    let source = audio.into_channels();

    if source.is_empty() {
        return DecodedAudio::new(vec![Vec::new(); format.channels() as usize], sample_rate);
    }

    let channels = if format.stereo {
        to_stereo(source)
    } else {
        vec![to_mono(&source, frames)]
    };
    DecodedAudio::new(channels, sample_rate)
}

fn to_mono(source: &[Vec<f32>], frames: usize) -> Vec<f32> {
    if source.len() == 1 {
        return source[0][..frames].to_vec();
    }
    let n = source.len() as f32;
    (0..frames)
        .map(|i| source.iter().map(|ch| ch[i]).sum::<f32>() / n)
        .collect()
}

fn to_stereo(mut source: Vec<Vec<f32>>) -> Vec<Vec<f32>> {
    if source.len() == 1 {
        let left = source.remove(0);
        let right = left.clone();
        return vec![left, right];
    }
    source.truncate(2);
    source
}
