//! Synthesis modules.
//!
//! - `pluck` - feedback-delay plucked string with harmonic enrichment and
//!   soft-clip tone shaping

pub mod pluck;

use rand_pcg::Pcg32;

pub use pluck::{Harmonic, PluckEvent, PluckString, PluckVoice};

/// Common trait for synthesis modules.
pub trait Synthesizer {
    /// Generates audio samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `rng` - Deterministic RNG for any randomness
    ///
    /// # Returns
    /// Vector of audio samples in range [-1.0, 1.0]
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64>;
}
