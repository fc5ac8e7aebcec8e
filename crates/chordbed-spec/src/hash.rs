//! Seed derivation.
//!
//! Loops are seeded from their filename so the same entry always renders the
//! same audio, independent of table order.

/// Derives a 32-bit seed from a loop filename.
///
/// ```text
/// seed = u32_le(BLAKE3(filename)[0..4])
/// ```
pub fn loop_seed(filename: &str) -> u32 {
    let hash = blake3::hash(filename.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
