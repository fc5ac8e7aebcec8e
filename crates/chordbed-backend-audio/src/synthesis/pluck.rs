//! Plucked-string voice.
//!
//! A Karplus-Strong style delay line seeded with noise provides the string
//! body. Its output is enriched with two sine partials at 2x and 3x the
//! fundamental, warmed by a one-pole lowpass and driven through a normalized
//! `tanh` soft clipper. The result is shaped by a [`PluckEnvelope`] and summed
//! into a stereo buffer with a linear pan law.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use super::Synthesizer;
use crate::envelope::PluckEnvelope;
use crate::mixer::StereoOutput;

/// Lowest frequency the delay line is tuned to.
pub const MIN_FREQUENCY: f64 = 40.0;

/// Shortest delay line in samples.
pub const MIN_DELAY_LENGTH: usize = 2;

/// Normalized `tanh` soft clip: `tanh(x * drive) / tanh(drive)`.
///
/// Full-scale input maps to exactly ±1.0.
#[inline]
pub fn soft_clip(sample: f64, drive: f64) -> f64 {
    (sample * drive).tanh() / drive.tanh()
}

/// One note to render into a loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckEvent {
    /// Onset in seconds from the start of the loop.
    pub start: f64,
    /// Fundamental frequency in Hz.
    pub frequency: f64,
    /// Note length in seconds.
    pub duration: f64,
    /// Linear amplitude.
    pub amplitude: f64,
    /// Stereo position (-1.0 = left, 0.0 = center, 1.0 = right).
    pub pan: f64,
}

/// A sine partial added on top of the string body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// Frequency as a multiple of the fundamental.
    pub multiple: f64,
    /// Linear gain.
    pub gain: f64,
}

/// Timbre settings shared by every note of a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PluckVoice {
    /// Feedback gain applied on every pass through the delay line.
    pub decay: f64,
    /// Peak level of the noise burst that excites the string.
    pub excitation: f64,
    /// Partials added to the string output. Each gets a random start phase.
    pub harmonics: Vec<Harmonic>,
    /// One-pole lowpass coefficient (0.0 = closed, 1.0 = bypass).
    pub lowpass: f64,
    /// Soft-clip drive.
    pub drive: f64,
    /// Amplitude envelope.
    pub envelope: PluckEnvelope,
}

impl Default for PluckVoice {
    fn default() -> Self {
        Self::guitar()
    }
}

impl PluckVoice {
    /// Mellow, lightly overdriven electric guitar.
    pub fn guitar() -> Self {
        Self {
            decay: 0.9983,
            excitation: 0.58,
            harmonics: vec![
                Harmonic {
                    multiple: 2.0,
                    gain: 0.17,
                },
                Harmonic {
                    multiple: 3.0,
                    gain: 0.06,
                },
            ],
            lowpass: 0.17,
            drive: 1.18,
            envelope: PluckEnvelope::default(),
        }
    }

    /// Tunes the voice to a frequency.
    pub fn at(&self, frequency: f64) -> PluckString<'_> {
        PluckString {
            voice: self,
            frequency,
        }
    }

    /// Renders one event and adds it into `output`.
    ///
    /// Start and length are rounded to whole samples. Events that start at or
    /// past the end of the buffer, or that round to zero samples, are skipped
    /// without touching `rng`. Notes running past the end are truncated.
    ///
    /// Returns the number of samples written.
    pub fn render_into(
        &self,
        output: &mut StereoOutput,
        event: &PluckEvent,
        sample_rate: f64,
        rng: &mut Pcg32,
    ) -> usize {
        let start = (event.start.max(0.0) * sample_rate).round() as usize;
        let length = (event.duration.max(0.0) * sample_rate).round() as usize;
        if start >= output.len() || length == 0 {
            return 0;
        }
        let length = length.min(output.len() - start);

        let mut samples = self.at(event.frequency).synthesize(length, sample_rate, rng);
        self.envelope.apply(&mut samples, sample_rate);
        output.add_panned(start, &samples, event.amplitude, event.pan);

        length
    }
}

/// A [`PluckVoice`] tuned to one fundamental.
#[derive(Debug, Clone, Copy)]
pub struct PluckString<'a> {
    voice: &'a PluckVoice,
    frequency: f64,
}

impl PluckString<'_> {
    /// Delay line length in samples for this fundamental.
    pub fn delay_length(&self, sample_rate: f64) -> usize {
        let length = (sample_rate / self.frequency.max(MIN_FREQUENCY)).round() as usize;
        length.max(MIN_DELAY_LENGTH)
    }
}

struct Partial {
    phase: f64,
    increment: f64,
    gain: f64,
}

impl Synthesizer for PluckString<'_> {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let voice = self.voice;
        let delay_length = self.delay_length(sample_rate);

        // Noise burst first, then one start phase per partial.
        let mut delay_line: Vec<f64> = (0..delay_length)
            .map(|_| (rng.gen::<f64>() * 2.0 - 1.0) * voice.excitation)
            .collect();
        let fundamental = TAU * self.frequency / sample_rate;
        let mut partials: Vec<Partial> = voice
            .harmonics
            .iter()
            .map(|h| Partial {
                phase: rng.gen::<f64>() * TAU,
                increment: fundamental * h.multiple,
                gain: h.gain,
            })
            .collect();

        let mut lowpass_state = 0.0;
        let mut pos = 0;
        let mut output = Vec::with_capacity(num_samples);

        for _ in 0..num_samples {
            let next_pos = (pos + 1) % delay_length;
            let current = delay_line[pos];
            delay_line[pos] = (current + delay_line[next_pos]) * 0.5 * voice.decay;
            pos = next_pos;

            let mut sample = current;
            for partial in partials.iter_mut() {
                sample += partial.gain * partial.phase.sin();
                partial.phase = (partial.phase + partial.increment) % TAU;
            }

            lowpass_state += voice.lowpass * (sample - lowpass_state);
            output.push(soft_clip(lowpass_state, voice.drive));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    const SR: f64 = 44100.0;

    fn event(start: f64, duration: f64) -> PluckEvent {
        PluckEvent {
            start,
            frequency: 220.0,
            duration,
            amplitude: 0.5,
            pan: 0.0,
        }
    }

    #[test]
    fn test_delay_length() {
        let voice = PluckVoice::guitar();
        assert_eq!(voice.at(441.0).delay_length(SR), 100);
        assert_eq!(voice.at(220.0).delay_length(SR), 200);
        // Low notes clamp to the 40 Hz floor.
        assert_eq!(voice.at(10.0).delay_length(SR), 1103);
        // Very high notes clamp to two samples.
        assert_eq!(voice.at(40_000.0).delay_length(SR), 2);
    }

    #[test]
    fn test_synthesize_length_and_bounds() {
        let voice = PluckVoice::guitar();
        let mut rng = create_rng(42);
        let samples = voice.at(196.0).synthesize(22050, SR, &mut rng);

        assert_eq!(samples.len(), 22050);
        // Normalized tanh never exceeds 1 / tanh(drive).
        let limit = 1.0 / voice.drive.tanh();
        assert!(samples.iter().all(|s| s.abs() <= limit));
        assert!(samples.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_string_decays() {
        let voice = PluckVoice {
            harmonics: Vec::new(),
            ..PluckVoice::guitar()
        };
        let mut rng = create_rng(7);
        let samples = voice.at(220.0).synthesize(88200, SR, &mut rng);

        let early: f64 = samples[0..4410].iter().map(|s| s * s).sum();
        let late: f64 = samples[80000..84410].iter().map(|s| s * s).sum();
        assert!(early > late * 2.0);
    }

    #[test]
    fn test_soft_clip() {
        let drive = 1.18_f64;
        assert!((soft_clip(1.0, drive) - 1.0).abs() < 1e-12);
        assert!((soft_clip(-1.0, drive) + 1.0).abs() < 1e-12);
        assert_eq!(soft_clip(0.0, drive), 0.0);
        // Small-signal slope is drive / tanh(drive).
        let x = 1e-4;
        assert!((soft_clip(x, drive) / x - drive / drive.tanh()).abs() < 1e-6);
        // Compresses toward the limit.
        assert!(soft_clip(2.0, drive) < 2.0 / drive.tanh());
    }

    #[test]
    fn test_synthesize_determinism() {
        let voice = PluckVoice::guitar();
        let a = voice.at(330.0).synthesize(2000, SR, &mut create_rng(42));
        let b = voice.at(330.0).synthesize(2000, SR, &mut create_rng(42));
        let c = voice.at(330.0).synthesize(2000, SR, &mut create_rng(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_render_into_writes_at_offset() {
        let voice = PluckVoice::guitar();
        let mut out = StereoOutput::new(44100);
        let written = voice.render_into(&mut out, &event(0.5, 0.25), SR, &mut create_rng(1));

        assert_eq!(written, 11025);
        assert!(out.left[..22050].iter().all(|&s| s == 0.0));
        assert!(out.left[22050 + 11025..].iter().all(|&s| s == 0.0));
        assert!(out.left[22050..22050 + 11025].iter().any(|&s| s != 0.0));
        // Attack starts from silence.
        assert_eq!(out.left[22050], 0.0);
    }

    #[test]
    fn test_render_into_clamps_to_buffer() {
        let voice = PluckVoice::guitar();
        let mut out = StereoOutput::new(1000);
        let written = voice.render_into(&mut out, &event(0.0, 10.0), SR, &mut create_rng(1));
        assert_eq!(written, 1000);
        assert_eq!(out.len(), 1000);
    }

    #[test]
    fn test_render_into_skips_without_consuming_rng() {
        let voice = PluckVoice::guitar();
        let mut out = StereoOutput::new(1000);
        let mut rng = create_rng(9);

        assert_eq!(voice.render_into(&mut out, &event(1.0, 0.5), SR, &mut rng), 0);
        assert_eq!(voice.render_into(&mut out, &event(0.0, 0.0), SR, &mut rng), 0);
        assert!(out.is_silent());

        let mut fresh = create_rng(9);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_render_into_accumulates() {
        let voice = PluckVoice::guitar();
        let mut once = StereoOutput::new(4410);
        voice.render_into(&mut once, &event(0.0, 0.1), SR, &mut create_rng(3));

        let mut twice = StereoOutput::new(4410);
        voice.render_into(&mut twice, &event(0.0, 0.1), SR, &mut create_rng(3));
        voice.render_into(&mut twice, &event(0.0, 0.1), SR, &mut create_rng(3));

        for (a, b) in once.left.iter().zip(twice.left.iter()) {
            assert!((b - 2.0 * a).abs() < 1e-12);
        }
    }

    #[test]
    fn test_render_into_pan() {
        let voice = PluckVoice::guitar();
        let mut out = StereoOutput::new(4410);
        let hard_right = PluckEvent {
            pan: 1.0,
            ..event(0.0, 0.1)
        };
        voice.render_into(&mut out, &hard_right, SR, &mut create_rng(3));
        assert!(out.left.iter().all(|&s| s == 0.0));
        assert!(out.right.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        let voice = PluckVoice::guitar();
        let mut out = StereoOutput::new(4410);
        let muted = PluckEvent {
            amplitude: 0.0,
            ..event(0.0, 0.1)
        };
        voice.render_into(&mut out, &muted, SR, &mut create_rng(3));
        assert!(out.is_silent());
    }
}
