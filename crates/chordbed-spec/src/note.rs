//! Note name and frequency conversion.
//!
//! Note names are a pitch class letter, an optional `#`, and a single octave
//! digit (`"C3"`, `"F#4"`). Frequencies use twelve-tone equal temperament
//! anchored at A4 = 440 Hz.

use crate::error::SpecError;

/// Reference pitch for A4 in Hz.
pub const A4_FREQ: f64 = 440.0;

/// MIDI note number of A4.
pub const A4_MIDI: i32 = 69;

/// Semitone offsets for every pitch class name accepted in a note string.
const SEMITONE_TABLE: [(&str, i32); 12] = [
    ("C", 0),
    ("C#", 1),
    ("D", 2),
    ("D#", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("G", 7),
    ("G#", 8),
    ("A", 9),
    ("A#", 10),
    ("B", 11),
];

/// Returns the semitone offset (0-11) for a pitch class name such as `"F#"`.
pub fn semitone_offset(name: &str) -> Option<i32> {
    SEMITONE_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| *s)
}

/// Splits a note string into `(semitone, octave)`.
///
/// # Errors
/// Returns [`SpecError::InvalidNote`] if the string is not 2-3 ASCII
/// characters, the octave is not a single digit, the middle character of a
/// three-character note is not `#`, or the pitch class is unknown.
pub fn parse_note(note: &str) -> Result<(i32, i32), SpecError> {
    if !note.is_ascii() || !(2..=3).contains(&note.len()) {
        return Err(SpecError::invalid_note(
            note,
            "expected a letter, optional '#', and one octave digit",
        ));
    }

    let (name, octave) = note.split_at(note.len() - 1);
    let octave = octave
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| SpecError::invalid_note(note, "octave must be a single digit"))?;

    if name.len() == 2 && !name.ends_with('#') {
        return Err(SpecError::invalid_note(note, "only '#' accidentals are supported"));
    }

    let semitone = semitone_offset(name)
        .ok_or_else(|| SpecError::invalid_note(note, "unknown pitch class"))?;

    Ok((semitone, octave as i32))
}

/// Converts a note string to its MIDI note number.
///
/// `midi = (octave + 1) * 12 + semitone`, so `"C4"` is 60 and `"A4"` is 69.
pub fn note_to_midi(note: &str) -> Result<i32, SpecError> {
    let (semitone, octave) = parse_note(note)?;
    Ok((octave + 1) * 12 + semitone)
}

/// Converts a MIDI note number to frequency in Hz.
///
/// Uses the standard formula: f = 440 * 2^((n-69)/12).
pub fn midi_to_freq(midi: i32) -> f64 {
    A4_FREQ * 2.0_f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

/// Converts a note string to frequency in Hz.
///
/// # Examples
/// ```
/// use chordbed_spec::note::note_to_freq;
///
/// let a4 = note_to_freq("A4").unwrap();
/// assert!((a4 - 440.0).abs() < 1e-6);
///
/// let c4 = note_to_freq("C4").unwrap();
/// assert!((c4 - 261.626).abs() < 0.01);
///
/// assert!(note_to_freq("H4").is_err());
/// ```
pub fn note_to_freq(note: &str) -> Result<f64, SpecError> {
    note_to_midi(note).map(midi_to_freq)
}
