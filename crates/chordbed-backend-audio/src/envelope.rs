//! Pluck envelope: linear attack, flat sustain, linear release.
//!
//! The release ramp has a fixed slope of `1 / release` per sample counted
//! back from the end of the note. A note shorter than the release therefore
//! never reaches full level after its attack.

/// Attack/release envelope for a plucked note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckEnvelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for PluckEnvelope {
    fn default() -> Self {
        Self {
            attack: 0.018,
            release: 0.78,
        }
    }
}

impl PluckEnvelope {
    /// Creates a new envelope.
    pub fn new(attack: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            release: release.max(0.0),
        }
    }

    /// Attack length in samples (at least 1).
    pub fn attack_samples(&self, sample_rate: f64) -> usize {
        ((self.attack * sample_rate).round() as usize).max(1)
    }

    /// Release length in samples (at least 1).
    pub fn release_samples(&self, sample_rate: f64) -> usize {
        ((self.release * sample_rate).round() as usize).max(1)
    }

    /// Envelope gain for sample `index` of a note `length` samples long.
    #[inline]
    pub fn gain(index: usize, length: usize, attack_samples: usize, release_samples: usize) -> f64 {
        if index < attack_samples {
            index as f64 / attack_samples as f64
        } else if index + release_samples > length {
            (length.saturating_sub(index) as f64 / release_samples as f64).max(0.0)
        } else {
            1.0
        }
    }

    /// Multiplies `samples` by the envelope in place.
    pub fn apply(&self, samples: &mut [f64], sample_rate: f64) {
        let length = samples.len();
        let attack = self.attack_samples(sample_rate);
        let release = self.release_samples(sample_rate);
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= Self::gain(i, length, attack, release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lengths() {
        let env = PluckEnvelope::default();
        assert_eq!(env.attack_samples(44100.0), 794);
        assert_eq!(env.release_samples(44100.0), 34398);
    }

    #[test]
    fn test_attack_starts_at_zero() {
        assert_eq!(PluckEnvelope::gain(0, 100_000, 794, 34398), 0.0);
        let mid = PluckEnvelope::gain(397, 100_000, 794, 34398);
        assert!((mid - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sustain_is_flat() {
        for i in [794, 10_000, 65_602] {
            assert_eq!(PluckEnvelope::gain(i, 100_000, 794, 34398), 1.0);
        }
    }

    #[test]
    fn test_release_reaches_zero() {
        let length = 100_000;
        let near_end = PluckEnvelope::gain(length - 1, length, 794, 34398);
        assert!(near_end > 0.0 && near_end < 1e-4);
        let half = PluckEnvelope::gain(length - 34398 / 2, length, 794, 34398);
        assert!((half - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_short_note_never_reaches_sustain() {
        let mut samples = vec![1.0; 10_000];
        PluckEnvelope::default().apply(&mut samples, 44100.0);
        assert!(samples.iter().all(|&s| (0.0..1.0).contains(&s)));
    }

    #[test]
    fn test_apply_shapes_in_place() {
        let mut samples = vec![1.0; 88_200];
        PluckEnvelope::default().apply(&mut samples, 44100.0);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[20_000], 1.0);
        assert!(samples[88_199] < 1e-4);
    }
}
