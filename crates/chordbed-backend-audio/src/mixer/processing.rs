//! Peak measurement and normalization.

use super::types::StereoOutput;

/// Peak normalization settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakNormalize {
    /// Peak level the loudest sample is scaled to.
    pub target: f64,
    /// Hard limit applied after scaling.
    pub ceiling: f64,
    /// Lower bound on the measured peak, so silence never divides by zero.
    pub floor: f64,
}

impl Default for PeakNormalize {
    fn default() -> Self {
        Self {
            target: 0.89,
            ceiling: 0.98,
            floor: 1e-8,
        }
    }
}

/// Returns the largest absolute sample across both channels.
pub fn peak(stereo: &StereoOutput) -> f64 {
    stereo
        .left
        .iter()
        .chain(stereo.right.iter())
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b))
}

/// Scales both channels so the shared peak lands on `settings.target`, then
/// clamps to `±settings.ceiling`.
///
/// Returns the gain that was applied.
pub fn normalize_peak(stereo: &mut StereoOutput, settings: &PeakNormalize) -> f64 {
    let current_peak = peak(stereo).max(settings.floor);
    let gain = settings.target / current_peak;
    let ceiling = settings.ceiling;

    for sample in stereo.left.iter_mut().chain(stereo.right.iter_mut()) {
        *sample = (*sample * gain).clamp(-ceiling, ceiling);
    }

    gain
}
