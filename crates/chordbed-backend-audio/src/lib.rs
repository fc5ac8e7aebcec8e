//! chordbed Audio Backend
//!
//! Renders the loop table into stereo WAV files of plucked, softly strummed
//! guitar chords.
//!
//! # Overview
//!
//! Each loop is eight bars of a chord progression. Every bar gets a low root
//! anchor and two strums; every note is a feedback-delay plucked string with
//! added octave and twelfth partials, a gentle lowpass, and soft clipping.
//! The summed mix gets a slow "breathing" drift, a short fade at each edge so
//! it loops cleanly, and peak normalization.
//!
//! # Determinism
//!
//! Rendering is deterministic. The seed is derived from the loop filename via
//! BLAKE3, and two independent PCG32 streams are derived from it: one for pan
//! jitter in the sequencer, one for excitation noise and partial phases in the
//! string model. Re-rendering a loop yields byte-identical PCM.
//!
//! # Example
//!
//! ```no_run
//! use chordbed_backend_audio::generate::{render_loop, write_loop, RenderParams};
//! use chordbed_spec::{LoopTable, VoicingTable};
//! use std::path::Path;
//!
//! let voicings = VoicingTable::standard();
//! let params = RenderParams::default();
//! for spec in LoopTable::standard().iter() {
//!     let result = render_loop(spec, &voicings, &params)?;
//!     println!("{}: {}", result.filename, result.wav.pcm_hash);
//!     write_loop(spec, &result, Path::new("."))?;
//! }
//! # Ok::<(), chordbed_backend_audio::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate`] - Loop rendering entry points and parameters
//! - [`sequencer`] - Progression to note events
//! - [`synthesis`] - Plucked string model
//! - [`envelope`] - Attack/release envelope
//! - [`mixer`] - Stereo accumulation, panning, normalization
//! - [`modulation`] - Breathing drift
//! - [`loop_processing`] - Loop-edge fades
//! - [`rng`] - Deterministic RNG with stream derivation
//! - [`wav`] - Deterministic WAV file writer

pub mod envelope;
pub mod error;
pub mod generate;
pub mod loop_processing;
pub mod mixer;
pub mod modulation;
pub mod rng;
pub mod sequencer;
pub mod synthesis;
pub mod wav;

pub use error::{AudioError, AudioResult};
pub use generate::{render_loop, write_loop, GenerateResult, PostProcessParams, RenderParams};
pub use sequencer::{sequence_loop, StrumPattern};
pub use wav::WavResult;
