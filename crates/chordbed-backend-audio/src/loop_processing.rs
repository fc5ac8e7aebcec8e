//! Loop-edge treatment.
//!
//! Rendered loops play back-to-back, so the first and last samples must meet
//! at silence. A short linear fade-in at the head and a mirrored fade-out at
//! the tail pin both ends to exactly zero.

use crate::mixer::StereoOutput;

/// Number of samples faded at each end.
///
/// At least one sample, and never more than half the buffer so the two fades
/// cannot overlap.
pub fn edge_fade_samples(fade_seconds: f64, sample_rate: f64, num_samples: usize) -> usize {
    let fade = ((fade_seconds * sample_rate).round() as usize).max(1);
    fade.min(num_samples / 2)
}

/// Applies a linear fade-in and fade-out to both channels.
///
/// Sample `i` of the head and sample `len - 1 - i` of the tail are scaled by
/// `i / fade` for `i < fade`.
///
/// # Returns
/// Number of samples faded at each end.
pub fn apply_edge_fade(stereo: &mut StereoOutput, fade_seconds: f64, sample_rate: f64) -> usize {
    let len = stereo.len();
    let fade = edge_fade_samples(fade_seconds, sample_rate, len);

    for i in 0..fade {
        let ramp = i as f64 / fade as f64;
        let tail = len - 1 - i;
        stereo.left[i] *= ramp;
        stereo.right[i] *= ramp;
        stereo.left[tail] *= ramp;
        stereo.right[tail] *= ramp;
    }

    fade
}

/// Measures the worst absolute sample at either end of either channel.
///
/// Returns 0.0 for an empty buffer.
pub fn edge_level(stereo: &StereoOutput) -> f64 {
    let ends = [
        stereo.left.first(),
        stereo.left.last(),
        stereo.right.first(),
        stereo.right.last(),
    ];
    ends.iter()
        .flatten()
        .map(|s| s.abs())
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(len: usize, value: f64) -> StereoOutput {
        StereoOutput {
            left: vec![value; len],
            right: vec![-value; len],
        }
    }

    #[test]
    fn test_fade_length() {
        assert_eq!(edge_fade_samples(0.02, 44100.0, 1_000_000), 882);
        assert_eq!(edge_fade_samples(0.02, 44100.0, 1000), 500);
        assert_eq!(edge_fade_samples(0.0, 44100.0, 1000), 1);
        assert_eq!(edge_fade_samples(0.02, 44100.0, 1), 0);
    }

    #[test]
    fn test_ends_are_silent() {
        let mut stereo = constant(44100, 0.7);
        let fade = apply_edge_fade(&mut stereo, 0.02, 44100.0);

        assert_eq!(fade, 882);
        assert_eq!(stereo.left[0], 0.0);
        assert_eq!(stereo.left[44099], 0.0);
        assert_eq!(stereo.right[0], 0.0);
        assert_eq!(stereo.right[44099], 0.0);
        assert_eq!(edge_level(&stereo), 0.0);
    }

    #[test]
    fn test_ramp_is_linear_and_mirrored() {
        let mut stereo = constant(10_000, 1.0);
        apply_edge_fade(&mut stereo, 0.02, 44100.0);

        assert!((stereo.left[441] - 0.5).abs() < 1e-12);
        assert!((stereo.left[10_000 - 1 - 441] - 0.5).abs() < 1e-12);
        assert_eq!(stereo.left[882], 1.0);
        assert_eq!(stereo.left[10_000 - 1 - 882], 1.0);
        assert_eq!(stereo.left[5000], 1.0);
    }

    #[test]
    fn test_short_buffer_fades_do_not_overlap() {
        let mut stereo = constant(100, 1.0);
        let fade = apply_edge_fade(&mut stereo, 0.02, 44100.0);
        assert_eq!(fade, 50);
        // Every sample is touched exactly once.
        assert!((stereo.left[49] - 49.0 / 50.0).abs() < 1e-12);
        assert!((stereo.left[50] - 49.0 / 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_buffer() {
        let mut stereo = StereoOutput::new(0);
        assert_eq!(apply_edge_fade(&mut stereo, 0.02, 44100.0), 0);
        assert_eq!(edge_level(&stereo), 0.0);
    }
}
