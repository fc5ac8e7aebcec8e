//! Fixed guitar voicing table.

use serde::Serialize;

use crate::error::SpecError;
use crate::note::note_to_freq;

/// Number of notes in every voicing.
pub const VOICING_SIZE: usize = 4;

const STANDARD_VOICINGS: [(&str, [&str; VOICING_SIZE]); 12] = [
    ("Cmaj7", ["C3", "G3", "B3", "E4"]),
    ("Amadd9", ["A2", "E3", "B3", "C4"]),
    ("G6", ["G2", "D3", "E3", "B3"]),
    ("Dm9", ["D3", "A3", "C4", "E4"]),
    ("Em7", ["E2", "B2", "D3", "G3"]),
    ("Fmaj7", ["F2", "C3", "E3", "A3"]),
    ("Gsus2", ["G2", "D3", "A3", "D4"]),
    ("Csus2", ["C3", "G3", "D4", "G4"]),
    ("Amin7", ["A2", "E3", "G3", "C4"]),
    ("Dadd9", ["D3", "A3", "E4", "F#4"]),
    ("Emin9", ["E2", "B2", "D3", "F#3"]),
    ("Cmaj9", ["C3", "G3", "B3", "D4"]),
];

/// A named chord realized as four concrete pitches, lowest string first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voicing {
    /// Chord label, e.g. `"Cmaj7"`.
    pub label: &'static str,
    /// Note names in strum order. Index 0 is the root used for the low anchor.
    pub notes: [&'static str; VOICING_SIZE],
}

impl Voicing {
    /// Returns the note names in strum order.
    pub fn notes(&self) -> &[&'static str; VOICING_SIZE] {
        &self.notes
    }

    /// Returns the root note name.
    pub fn root(&self) -> &'static str {
        self.notes[0]
    }

    /// Resolves every note to a frequency in Hz.
    pub fn frequencies(&self) -> Result<[f64; VOICING_SIZE], SpecError> {
        let mut freqs = [0.0; VOICING_SIZE];
        for (freq, note) in freqs.iter_mut().zip(self.notes.iter()) {
            *freq = note_to_freq(note)?;
        }
        Ok(freqs)
    }
}

/// Closed lookup table from chord label to voicing.
#[derive(Debug, Clone)]
pub struct VoicingTable {
    voicings: Vec<Voicing>,
}

impl VoicingTable {
    /// Builds the standard 12-entry table.
    pub fn standard() -> Self {
        Self {
            voicings: STANDARD_VOICINGS
                .iter()
                .map(|&(label, notes)| Voicing { label, notes })
                .collect(),
        }
    }

    /// Looks up a voicing by chord label.
    ///
    /// # Errors
    /// Returns [`SpecError::UnknownChord`] if the label is not in the table.
    pub fn lookup(&self, label: &str) -> Result<&Voicing, SpecError> {
        self.voicings
            .iter()
            .find(|v| v.label == label)
            .ok_or_else(|| SpecError::UnknownChord(label.to_string()))
    }

    /// Iterates over all voicings in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Voicing> {
        self.voicings.iter()
    }

    /// Number of voicings.
    pub fn len(&self) -> usize {
        self.voicings.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.voicings.is_empty()
    }

    /// Checks that every note in every voicing parses.
    pub fn validate(&self) -> Result<(), SpecError> {
        for voicing in &self.voicings {
            voicing.frequencies()?;
        }
        Ok(())
    }
}

impl Default for VoicingTable {
    fn default() -> Self {
        Self::standard()
    }
}
