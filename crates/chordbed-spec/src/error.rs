//! Error types for note parsing and table lookups.

use thiserror::Error;

/// Errors raised while resolving notes, voicings, or loop entries.
///
/// All of these indicate a defect in the fixed configuration tables rather
/// than a recoverable runtime condition, so callers abort on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Note string is not `<letter>[#]<octave digit>` or names an unknown pitch class.
    #[error("invalid note '{note}': {reason}")]
    InvalidNote {
        /// The offending note string.
        note: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Chord label is not in the voicing table.
    #[error("unknown chord '{0}'")]
    UnknownChord(String),

    /// A loop entry has no chords to cycle through.
    #[error("loop '{0}' has an empty progression")]
    EmptyProgression(String),

    /// A loop entry has a zero tempo.
    #[error("loop '{filename}' has invalid tempo {bpm} BPM")]
    InvalidTempo {
        /// Loop filename.
        filename: String,
        /// The rejected tempo.
        bpm: u32,
    },
}

impl SpecError {
    /// Creates an invalid note error.
    pub fn invalid_note(note: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidNote {
            note: note.into(),
            reason,
        }
    }

    /// Returns a stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidNote { .. } => "E001",
            SpecError::UnknownChord(_) => "E002",
            SpecError::EmptyProgression(_) => "E003",
            SpecError::InvalidTempo { .. } => "E004",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_note_message() {
        let err = SpecError::invalid_note("H4", "unknown pitch class");
        assert!(err.to_string().contains("H4"));
        assert!(err.to_string().contains("unknown pitch class"));
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_unknown_chord_message() {
        let err = SpecError::UnknownChord("Bdim".to_string());
        assert_eq!(err.to_string(), "unknown chord 'Bdim'");
        assert_eq!(err.code(), "E002");
    }
}
