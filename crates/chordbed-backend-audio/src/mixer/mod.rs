//! Stereo accumulation buffer, pan law, and peak normalization.
//!
//! Every note of a loop is summed into one [`StereoOutput`] owned by the
//! render call. Notes are added, never overwritten, so overlapping strums
//! and sustains build up chords naturally.

mod processing;
mod types;

#[cfg(test)]
mod tests_normalization;
#[cfg(test)]
mod tests_stereo_output;

// Re-export public API
pub use processing::{normalize_peak, peak, PeakNormalize};
pub use types::{linear_pan, StereoOutput};
