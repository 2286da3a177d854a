//! MIDI note names.
//!
//! Uses the convention where middle C (MIDI 60) is `C4`, so octaves run
//! from -1 (`C-1` = 0) to 9 (`G9` = 127).

use thiserror::Error;

use crate::kit::MAX_NOTE;

const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// A note argument that is neither a MIDI number nor a note name in range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("note: invalid note {0:?}")]
    Invalid(String),

    #[error("note: {0:?} is outside 0..=127")]
    OutOfRange(String),
}

/// Parses a MIDI note given as a number (`"60"`) or a name (`"C4"`,
/// `"F#3"`, `"Bb2"`, `"c-1"`).
pub fn parse_note(s: &str) -> Result<u8, NoteError> {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<u8>()
            .ok()
            .filter(|&n| n <= MAX_NOTE)
            .ok_or_else(|| NoteError::OutOfRange(s.to_string()));
    }

    let invalid = || NoteError::Invalid(s.to_string());
    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let base: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(invalid()),
    };

    let rest = chars.as_str();
    let (accidental, octave) = match rest.as_bytes().first() {
        Some(b'#') => (1, &rest[1..]),
        Some(b'b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let digits = octave.strip_prefix('-').unwrap_or(octave);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let octave: i32 = octave
        .parse()
        .map_err(|_| NoteError::OutOfRange(s.to_string()))?;

    let midi = (octave as i64 + 1) * 12 + (base + accidental) as i64;
    if !(0..=MAX_NOTE as i64).contains(&midi) {
        return Err(NoteError::OutOfRange(s.to_string()));
    }
    Ok(midi as u8)
}

/// Returns the sharp-spelled name of a MIDI note, e.g. `60` → `"C4"`.
pub fn note_name(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NAMES[note as usize % 12], octave)
}
