//! Core types for stereo accumulation.

/// Linear pan law.
///
/// Returns `(left_gain, right_gain)` with `left = 0.5 * (1 - pan)` and
/// `right = 0.5 * (1 + pan)`, each clamped to `[0, 1]`. Centered sources sit
/// at half gain on both sides.
#[inline]
pub fn linear_pan(pan: f64) -> (f64, f64) {
    let left = (0.5 * (1.0 - pan)).clamp(0.0, 1.0);
    let right = (0.5 * (1.0 + pan)).clamp(0.0, 1.0);
    (left, right)
}

/// Stereo audio buffer with a fixed number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoOutput {
    /// Left channel samples.
    pub left: Vec<f64>,
    /// Right channel samples.
    pub right: Vec<f64>,
}

impl StereoOutput {
    /// Creates a silent buffer with the given number of frames.
    pub fn new(num_samples: usize) -> Self {
        Self {
            left: vec![0.0; num_samples],
            right: vec![0.0; num_samples],
        }
    }

    /// Adds a mono signal at `offset`, scaled by `volume` and panned.
    ///
    /// Samples past the end of the buffer are dropped.
    pub fn add_panned(&mut self, offset: usize, samples: &[f64], volume: f64, pan: f64) {
        if offset >= self.len() {
            return;
        }
        let (left_gain, right_gain) = linear_pan(pan);
        let end = (offset + samples.len()).min(self.len());

        let left = &mut self.left[offset..end];
        let right = &mut self.right[offset..end];
        for ((l, r), &sample) in left.iter_mut().zip(right.iter_mut()).zip(samples) {
            let scaled = sample * volume;
            *l += scaled * left_gain;
            *r += scaled * right_gain;
        }
    }

    /// Multiplies both channels of every frame by `gain(frame_index)`.
    pub fn apply_gain_curve(&mut self, mut gain: impl FnMut(usize) -> f64) {
        for (i, (l, r)) in self.left.iter_mut().zip(self.right.iter_mut()).enumerate() {
            let g = gain(i);
            *l *= g;
            *r *= g;
        }
    }

    /// Creates interleaved stereo samples.
    pub fn interleave(&self) -> Vec<f64> {
        let mut output = Vec::with_capacity(self.left.len() * 2);
        for (l, r) in self.left.iter().zip(self.right.iter()) {
            output.push(*l);
            output.push(*r);
        }
        output
    }

    /// Gets the number of frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Returns true if every sample is exactly zero.
    pub fn is_silent(&self) -> bool {
        self.left.iter().chain(self.right.iter()).all(|&s| s == 0.0)
    }
}
