//! Loop entries and the fixed loop table.
//!
//! Every loop is eight bars of 4/4 at a fixed tempo. The progression cycles
//! across the bars, so a two-chord progression alternates and a four-chord
//! progression plays twice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::voicing::VoicingTable;

/// Library directory relative to the output root.
pub const LIBRARY_DIR: &str = "assets/chords/library";

/// Bars per loop.
pub const BARS_PER_LOOP: u32 = 8;

/// Beats per bar.
pub const BEATS_PER_BAR: u32 = 4;

const STANDARD_LOOPS: [(&str, u32, [&str; 4]); 12] = [
    ("gtr_dumble_ambient_78_Cmaj7_cycle01.wav", 78, ["Cmaj7", "Amadd9", "Fmaj7", "G6"]),
    ("gtr_dumble_ambient_80_Amadd9_cycle02.wav", 80, ["Amadd9", "Fmaj7", "Cmaj7", "G6"]),
    ("gtr_dumble_ambient_82_G6_cycle03.wav", 82, ["G6", "Cmaj7", "Dm9", "Em7"]),
    ("gtr_dumble_ambient_74_Dm9_cycle04.wav", 74, ["Dm9", "Amadd9", "Fmaj7", "Cmaj7"]),
    ("gtr_dumble_ambient_88_Em7_cycle05.wav", 88, ["Em7", "Cmaj7", "G6", "Dadd9"]),
    ("gtr_dumble_ambient_72_Fmaj7_cycle06.wav", 72, ["Fmaj7", "Cmaj7", "Amadd9", "Gsus2"]),
    ("gtr_dumble_ambient_84_Gsus2_cycle07.wav", 84, ["Gsus2", "Dadd9", "Em7", "Csus2"]),
    ("gtr_dumble_ambient_76_Csus2_cycle08.wav", 76, ["Csus2", "Gsus2", "Amadd9", "Fmaj7"]),
    ("gtr_dumble_ambient_90_Amin7_cycle09.wav", 90, ["Amin7", "Fmaj7", "Cmaj7", "G6"]),
    ("gtr_dumble_ambient_86_Dadd9_cycle10.wav", 86, ["Dadd9", "Amin7", "Cmaj7", "Gsus2"]),
    ("gtr_dumble_ambient_80_Emin9_cycle11.wav", 80, ["Emin9", "Cmaj7", "G6", "Dadd9"]),
    ("gtr_dumble_ambient_92_Cmaj9_cycle12.wav", 92, ["Cmaj9", "Amadd9", "Fmaj7", "Gsus2"]),
];

/// One loop to render: output filename, tempo, and chord progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSpec {
    /// Output filename. Also the seed source for the loop's randomness.
    pub filename: String,
    /// Tempo in beats per minute.
    pub bpm: u32,
    /// Chord labels cycled across the bars.
    pub progression: Vec<String>,
}

impl LoopSpec {
    /// Creates a loop entry.
    pub fn new(filename: impl Into<String>, bpm: u32, progression: &[&str]) -> Self {
        Self {
            filename: filename.into(),
            bpm,
            progression: progression.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Length of one beat in seconds.
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.bpm as f64
    }

    /// Length of one bar in seconds.
    pub fn bar_seconds(&self) -> f64 {
        self.beat_seconds() * BEATS_PER_BAR as f64
    }

    /// Total loop length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.bar_seconds() * BARS_PER_LOOP as f64
    }

    /// Returns the chord label active in `bar`, cycling through the progression.
    ///
    /// Returns `None` only for an empty progression.
    pub fn chord_for_bar(&self, bar: u32) -> Option<&str> {
        if self.progression.is_empty() {
            return None;
        }
        let idx = bar as usize % self.progression.len();
        Some(self.progression[idx].as_str())
    }

    /// Full output path under `out_root`.
    pub fn output_path(&self, out_root: &Path) -> PathBuf {
        out_root.join(LIBRARY_DIR).join(&self.filename)
    }

    /// Checks tempo, progression length, and that every chord resolves.
    pub fn validate(&self, voicings: &VoicingTable) -> Result<(), SpecError> {
        if self.bpm == 0 {
            return Err(SpecError::InvalidTempo {
                filename: self.filename.clone(),
                bpm: self.bpm,
            });
        }
        if self.progression.is_empty() {
            return Err(SpecError::EmptyProgression(self.filename.clone()));
        }
        for chord in &self.progression {
            voicings.lookup(chord)?.frequencies()?;
        }
        Ok(())
    }
}

/// The closed set of loops this crate renders.
#[derive(Debug, Clone)]
pub struct LoopTable {
    loops: Vec<LoopSpec>,
}

impl LoopTable {
    /// Builds the standard 12-entry table.
    pub fn standard() -> Self {
        Self {
            loops: STANDARD_LOOPS
                .iter()
                .map(|(filename, bpm, progression)| LoopSpec::new(*filename, *bpm, progression))
                .collect(),
        }
    }

    /// Iterates over loops in table order.
    pub fn iter(&self) -> impl Iterator<Item = &LoopSpec> {
        self.loops.iter()
    }

    /// Number of loops.
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Finds a loop by exact filename.
    pub fn find(&self, filename: &str) -> Option<&LoopSpec> {
        self.loops.iter().find(|l| l.filename == filename)
    }

    /// Returns the loops whose filename contains `pattern`.
    pub fn matching<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a LoopSpec> + 'a {
        self.loops.iter().filter(move |l| l.filename.contains(pattern))
    }

    /// Validates every entry, stopping at the first error.
    pub fn validate(&self, voicings: &VoicingTable) -> Result<(), SpecError> {
        self.loops.iter().try_for_each(|l| l.validate(voicings))
    }
}

impl Default for LoopTable {
    fn default() -> Self {
        Self::standard()
    }
}
