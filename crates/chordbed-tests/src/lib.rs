//! chordbed End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full rendering flow:
//!
//! - Generation: loop table -> WAV files on disk
//! - Validation: header fields, frame counts, loop-edge silence, peak level
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chordbed-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use chordbed_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| render(&spec).wav.wav_data, 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod format_validators;

pub use determinism::{verify_determinism, DeterminismResult, DiffInfo};
pub use format_validators::{read_pcm16, validate_wav, FormatError, WavInfo};
