//! Slow "breathing" amplitude drift.
//!
//! Two sine LFOs at unrelated sub-audio rates are summed around unity gain and
//! applied to both channels alike, so the drift never shifts the stereo image.

use std::f64::consts::TAU;

use crate::mixer::StereoOutput;

/// One sine component of the drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftLfo {
    /// Modulation depth (peak deviation from unity).
    pub depth: f64,
    /// Rate in Hz.
    pub rate: f64,
    /// Start phase in radians.
    pub phase: f64,
}

/// Amplitude drift made of summed LFOs.
#[derive(Debug, Clone, PartialEq)]
pub struct Breathing {
    /// Components summed onto a gain of 1.0.
    pub lfos: Vec<DriftLfo>,
}

impl Default for Breathing {
    fn default() -> Self {
        Self {
            lfos: vec![
                DriftLfo {
                    depth: 0.027,
                    rate: 0.15,
                    phase: 0.0,
                },
                DriftLfo {
                    depth: 0.013,
                    rate: 0.06,
                    phase: 0.8,
                },
            ],
        }
    }
}

impl Breathing {
    /// Gain at time `t` seconds.
    pub fn gain_at(&self, t: f64) -> f64 {
        1.0 + self
            .lfos
            .iter()
            .map(|lfo| lfo.depth * (TAU * lfo.rate * t + lfo.phase).sin())
            .sum::<f64>()
    }

    /// Largest possible deviation from unity.
    pub fn max_depth(&self) -> f64 {
        self.lfos.iter().map(|lfo| lfo.depth.abs()).sum()
    }

    /// Applies the drift to every frame of `stereo`.
    pub fn apply(&self, stereo: &mut StereoOutput, sample_rate: f64) {
        stereo.apply_gain_curve(|i| self.gain_at(i as f64 / sample_rate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_at_zero() {
        let breathing = Breathing::default();
        let expected = 1.0 + 0.013 * 0.8_f64.sin();
        assert!((breathing.gain_at(0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gain_stays_near_unity() {
        let breathing = Breathing::default();
        let depth = breathing.max_depth();
        assert!((depth - 0.04).abs() < 1e-12);
        for i in 0..1000 {
            let g = breathing.gain_at(i as f64 * 0.1);
            assert!(g >= 1.0 - depth && g <= 1.0 + depth);
        }
    }

    #[test]
    fn test_apply_scales_channels_equally() {
        let mut stereo = StereoOutput::new(44100);
        stereo.add_panned(0, &vec![1.0; 44100], 1.0, -0.5);
        let before = stereo.clone();

        Breathing::default().apply(&mut stereo, 44100.0);

        for i in [0, 1000, 30000, 44099] {
            let gl = stereo.left[i] / before.left[i];
            let gr = stereo.right[i] / before.right[i];
            assert!((gl - gr).abs() < 1e-12);
            assert!((gl - Breathing::default().gain_at(i as f64 / 44100.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_breathing_is_identity() {
        let breathing = Breathing { lfos: Vec::new() };
        let mut stereo = StereoOutput::new(10);
        stereo.add_panned(0, &[0.3; 10], 1.0, 0.0);
        let before = stereo.clone();
        breathing.apply(&mut stereo, 44100.0);
        assert_eq!(stereo, before);
    }
}
