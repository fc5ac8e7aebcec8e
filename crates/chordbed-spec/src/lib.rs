//! chordbed configuration library
//!
//! This crate holds the fixed, immutable data that drives loop rendering:
//!
//! - [`note`]: note name to frequency conversion (equal temperament, A4 = 440 Hz)
//! - [`voicing`]: the closed table of four-note guitar voicings
//! - [`loop_spec`]: loop entries (filename, tempo, progression) and the loop table
//! - [`hash`]: seed derivation from loop filenames
//! - [`error`]: errors for malformed notes and unknown chords
//!
//! # Example
//!
//! ```
//! use chordbed_spec::{LoopTable, VoicingTable};
//!
//! let voicings = VoicingTable::standard();
//! let loops = LoopTable::standard();
//! loops.validate(&voicings).unwrap();
//!
//! let first = loops.iter().next().unwrap();
//! let chord = voicings.lookup(first.chord_for_bar(0).unwrap()).unwrap();
//! assert_eq!(chord.root(), "C3");
//! ```

pub mod error;
pub mod hash;
pub mod loop_spec;
pub mod note;
pub mod voicing;

pub use error::SpecError;
pub use hash::loop_seed;
pub use loop_spec::{LoopSpec, LoopTable, BARS_PER_LOOP, BEATS_PER_BAR, LIBRARY_DIR};
pub use note::{midi_to_freq, note_to_freq, note_to_midi};
pub use voicing::{Voicing, VoicingTable, VOICING_SIZE};
