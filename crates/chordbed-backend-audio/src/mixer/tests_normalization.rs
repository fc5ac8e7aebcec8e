//! Tests for peak normalization.

use super::*;

fn stereo(left: Vec<f64>, right: Vec<f64>) -> StereoOutput {
    StereoOutput { left, right }
}

#[test]
fn test_peak_spans_both_channels() {
    let s = stereo(vec![0.1, -0.3], vec![0.2, -0.7]);
    assert_eq!(peak(&s), 0.7);
}

#[test]
fn test_normalize_hits_target() {
    let mut s = stereo(vec![0.5, -0.3, 0.8], vec![-0.2, 0.1, 0.4]);
    let gain = normalize_peak(&mut s, &PeakNormalize::default());

    assert!((gain - 0.89 / 0.8).abs() < 1e-12);
    assert!((peak(&s) - 0.89).abs() < 1e-12);
}

#[test]
fn test_normalize_shared_gain_keeps_balance() {
    let mut s = stereo(vec![0.2, 0.2], vec![0.1, 0.1]);
    normalize_peak(&mut s, &PeakNormalize::default());
    assert!((s.left[0] / s.right[0] - 2.0).abs() < 1e-12);
}

#[test]
fn test_normalize_quiet_audio() {
    let mut s = stereo(vec![0.001, -0.0005], vec![0.0008, -0.0003]);
    normalize_peak(&mut s, &PeakNormalize::default());
    assert!((peak(&s) - 0.89).abs() < 1e-9);
}

#[test]
fn test_normalize_silent_audio() {
    let mut s = StereoOutput::new(16);
    let gain = normalize_peak(&mut s, &PeakNormalize::default());

    // Peak floor keeps the gain finite.
    assert!(gain.is_finite());
    assert!(s.is_silent());
}

#[test]
fn test_ceiling_clamps() {
    let settings = PeakNormalize {
        target: 1.5,
        ..PeakNormalize::default()
    };
    let mut s = stereo(vec![1.0, -0.5], vec![-1.0, 0.25]);
    normalize_peak(&mut s, &settings);

    assert_eq!(s.left[0], 0.98);
    assert_eq!(s.right[0], -0.98);
    assert!((s.left[1] + 0.75).abs() < 1e-12);
}
