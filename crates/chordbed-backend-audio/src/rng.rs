//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the backend flows through this module. A loop's base
//! seed comes from its filename; independent streams for the sequencer and
//! the string model are derived from it by key.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Stream key for pan jitter drawn by the sequencer.
pub const SEQUENCE_STREAM: &str = "sequence";

/// Stream key for string excitation noise and harmonic phases.
pub const PLUCK_STREAM: &str = "pluck";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a named stream from the base seed.
///
/// ```text
/// seed = u32_le(BLAKE3(base_seed_le || key)[0..4])
/// ```
pub fn derive_stream_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for a named stream.
pub fn create_stream_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_stream_seed(base_seed, key))
}
