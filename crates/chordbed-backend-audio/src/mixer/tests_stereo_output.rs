//! Tests for the stereo buffer and pan law.

use super::*;

#[test]
fn test_new_is_silent() {
    let stereo = StereoOutput::new(64);
    assert_eq!(stereo.len(), 64);
    assert!(!stereo.is_empty());
    assert!(stereo.is_silent());
}

#[test]
fn test_linear_pan_center() {
    assert_eq!(linear_pan(0.0), (0.5, 0.5));
}

#[test]
fn test_linear_pan_extremes() {
    assert_eq!(linear_pan(-1.0), (1.0, 0.0));
    assert_eq!(linear_pan(1.0), (0.0, 1.0));
    // Out-of-range pan is clamped per channel.
    assert_eq!(linear_pan(-3.0), (1.0, 0.0));
    assert_eq!(linear_pan(3.0), (0.0, 1.0));
}

#[test]
fn test_linear_pan_is_not_equal_power() {
    let (l, r) = linear_pan(0.5);
    assert!((l - 0.25).abs() < 1e-12);
    assert!((r - 0.75).abs() < 1e-12);
    assert!((l + r - 1.0).abs() < 1e-12);
}

#[test]
fn test_add_panned_accumulates() {
    let mut stereo = StereoOutput::new(8);
    stereo.add_panned(2, &[1.0, 1.0], 0.5, 0.0);
    stereo.add_panned(3, &[1.0, 1.0], 0.5, 0.0);

    assert_eq!(stereo.left, vec![0.0, 0.0, 0.25, 0.5, 0.25, 0.0, 0.0, 0.0]);
    assert_eq!(stereo.left, stereo.right);
}

#[test]
fn test_add_panned_hard_left() {
    let mut stereo = StereoOutput::new(4);
    stereo.add_panned(0, &[0.8; 4], 1.0, -1.0);
    assert_eq!(stereo.left, vec![0.8; 4]);
    assert!(stereo.right.iter().all(|&s| s == 0.0));
}

#[test]
fn test_add_panned_truncates_at_end() {
    let mut stereo = StereoOutput::new(4);
    stereo.add_panned(2, &[1.0; 10], 1.0, 0.0);
    assert_eq!(stereo.len(), 4);
    assert_eq!(stereo.left, vec![0.0, 0.0, 0.5, 0.5]);
}

#[test]
fn test_add_panned_past_end_is_noop() {
    let mut stereo = StereoOutput::new(4);
    stereo.add_panned(4, &[1.0; 4], 1.0, 0.0);
    stereo.add_panned(100, &[1.0; 4], 1.0, 0.0);
    assert!(stereo.is_silent());
}

#[test]
fn test_apply_gain_curve() {
    let mut stereo = StereoOutput::new(3);
    stereo.add_panned(0, &[2.0, 2.0, 2.0], 1.0, 0.0);
    stereo.apply_gain_curve(|i| i as f64);
    assert_eq!(stereo.left, vec![0.0, 1.0, 2.0]);
    assert_eq!(stereo.right, vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_interleave() {
    let stereo = StereoOutput {
        left: vec![1.0, 2.0],
        right: vec![-1.0, -2.0],
    };
    assert_eq!(stereo.interleave(), vec![1.0, -1.0, 2.0, -2.0]);
}
