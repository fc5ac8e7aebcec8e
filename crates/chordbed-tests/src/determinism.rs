//! Determinism testing helpers.
//!
//! Rendering must be byte-identical across runs. These helpers run a
//! generation closure several times and report the first differing byte.

use std::fmt;

/// Information about the first byte difference found between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference, or the shorter length on a size mismatch.
    pub offset: usize,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
    /// Output length of the reference run.
    pub expected_len: usize,
    /// Output length of the differing run.
    pub actual_len: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expected_len != self.actual_len {
            write!(
                f,
                "Length mismatch in run {}: expected {} bytes, got {}",
                self.run_index, self.expected_len, self.actual_len
            )
        } else {
            write!(
                f,
                "Difference at byte {} in run {}",
                self.offset, self.run_index
            )
        }
    }
}

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the reference output.
    pub hash: String,
    /// First difference, if any run diverged.
    pub diff: Option<DiffInfo>,
}

impl DeterminismResult {
    /// Whether all runs produced identical output.
    pub fn is_deterministic(&self) -> bool {
        self.diff.is_none()
    }

    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff {
            panic!(
                "Non-deterministic output detected!\nRuns: {}\nHash: {}\n{}",
                self.runs, self.hash, diff
            );
        }
    }
}

/// Run generation `runs` times and verify all outputs are identical.
///
/// # Panics
/// Panics if `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = blake3::hash(reference).to_hex().to_string();

    for run_index in 1..runs {
        let output = generate_fn();
        let output = output.as_ref();

        let first_diff = reference
            .iter()
            .zip(output.iter())
            .position(|(a, b)| a != b)
            .or_else(|| (reference.len() != output.len()).then_some(reference.len().min(output.len())));

        if let Some(offset) = first_diff {
            return DeterminismResult {
                runs,
                hash,
                diff: Some(DiffInfo {
                    offset,
                    run_index,
                    expected_len: reference.len(),
                    actual_len: output.len(),
                }),
            };
        }
    }

    DeterminismResult {
        runs,
        hash,
        diff: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_outputs() {
        let result = verify_determinism(|| vec![1u8, 2, 3], 3);
        assert!(result.is_deterministic());
        assert_eq!(result.hash, blake3::hash(&[1, 2, 3]).to_hex().to_string());
        result.assert_deterministic();
    }

    #[test]
    fn test_detects_difference() {
        let counter = Cell::new(0u8);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![0u8, counter.get()]
            },
            2,
        );
        let diff = result.diff.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!(diff.run_index, 1);
    }

    #[test]
    fn test_detects_length_mismatch() {
        let counter = Cell::new(0usize);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![7u8; counter.get()]
            },
            2,
        );
        let diff = result.diff.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!((diff.expected_len, diff.actual_len), (1, 2));
    }

    #[test]
    #[should_panic(expected = "Non-deterministic")]
    fn test_assert_panics_on_difference() {
        let counter = Cell::new(0u8);
        verify_determinism(
            || {
                counter.set(counter.get() + 1);
                [counter.get()]
            },
            2,
        )
        .assert_deterministic();
    }
}
