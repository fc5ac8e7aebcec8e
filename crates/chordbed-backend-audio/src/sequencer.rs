//! Chord progression to note events.
//!
//! Each bar gets one low root anchor and two strums. A strum plays the four
//! voicing notes low to high with a short stagger, decaying in level and
//! fanning slightly left to right. Small random pan offsets keep repeated
//! bars from sounding identical.

use chordbed_spec::{note_to_freq, LoopSpec, SpecError, VoicingTable, BARS_PER_LOOP};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::synthesis::PluckEvent;

/// The low note sounded at the top of each bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootAnchor {
    /// Offset from the bar start in seconds.
    pub offset: f64,
    /// Length in beats.
    pub duration_beats: f64,
    /// Linear amplitude.
    pub amplitude: f64,
    /// Base pan position.
    pub pan: f64,
    /// Maximum random pan offset in either direction.
    pub pan_jitter: f64,
}

impl Default for RootAnchor {
    fn default() -> Self {
        Self {
            offset: 0.01,
            duration_beats: 3.25,
            amplitude: 0.11,
            pan: -0.10,
            pan_jitter: 0.025,
        }
    }
}

/// One strum position within a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrumSlot {
    /// Position in beats from the bar start.
    pub beat: f64,
    /// Note length in beats.
    pub sustain_beats: f64,
    /// Amplitude of the lowest note.
    pub amplitude: f64,
}

/// How every bar of a loop is played.
#[derive(Debug, Clone, PartialEq)]
pub struct StrumPattern {
    /// Low root note per bar.
    pub anchor: RootAnchor,
    /// Strums in bar order.
    pub strums: Vec<StrumSlot>,
    /// Delay between successive notes of a strum, in seconds.
    pub stagger: f64,
    /// Shortest allowed strum note, in seconds.
    pub min_duration: f64,
    /// Per-note amplitude ratio going up the voicing.
    pub amplitude_falloff: f64,
    /// Pan of the lowest strum note.
    pub pan_start: f64,
    /// Pan step per note going up the voicing.
    pub pan_step: f64,
    /// Maximum random pan offset per strum note.
    pub pan_jitter: f64,
}

impl Default for StrumPattern {
    fn default() -> Self {
        Self {
            anchor: RootAnchor::default(),
            strums: vec![
                StrumSlot {
                    beat: 0.0,
                    sustain_beats: 3.6,
                    amplitude: 0.16,
                },
                StrumSlot {
                    beat: 2.25,
                    sustain_beats: 2.6,
                    amplitude: 0.11,
                },
            ],
            stagger: 0.032,
            min_duration: 0.75,
            amplitude_falloff: 0.88,
            pan_start: -0.06,
            pan_step: 0.045,
            pan_jitter: 0.02,
        }
    }
}

impl StrumPattern {
    /// Returns the same pattern with every amplitude set to zero.
    pub fn muted(mut self) -> Self {
        self.anchor.amplitude = 0.0;
        for strum in &mut self.strums {
            strum.amplitude = 0.0;
        }
        self
    }

    /// Number of events produced per bar for four-note voicings.
    pub fn events_per_bar(&self) -> usize {
        1 + self.strums.len() * chordbed_spec::VOICING_SIZE
    }
}

/// Draws a uniform offset in `[-range, range]`.
fn jitter(rng: &mut Pcg32, range: f64) -> f64 {
    if range > 0.0 {
        rng.gen_range(-range..=range)
    } else {
        0.0
    }
}

/// Expands a loop into its note events.
///
/// Events come out bar by bar: the root anchor first, then each strum slot in
/// order with its notes low to high.
///
/// # Errors
/// Returns [`SpecError`] if the progression is empty, names a chord missing
/// from `voicings`, or a voicing holds a malformed note.
pub fn sequence_loop(
    spec: &LoopSpec,
    voicings: &VoicingTable,
    pattern: &StrumPattern,
    rng: &mut Pcg32,
) -> Result<Vec<PluckEvent>, SpecError> {
    let beat = spec.beat_seconds();
    let bar_length = spec.bar_seconds();
    let mut events = Vec::with_capacity(BARS_PER_LOOP as usize * pattern.events_per_bar());

    for bar in 0..BARS_PER_LOOP {
        let chord = spec
            .chord_for_bar(bar)
            .ok_or_else(|| SpecError::EmptyProgression(spec.filename.clone()))?;
        let voicing = voicings.lookup(chord)?;
        let bar_start = bar as f64 * bar_length;

        // Halving the root frequency drops the anchor an octave below the voicing.
        let anchor = &pattern.anchor;
        events.push(PluckEvent {
            start: bar_start + anchor.offset,
            frequency: note_to_freq(voicing.root())? / 2.0,
            duration: anchor.duration_beats * beat,
            amplitude: anchor.amplitude,
            pan: anchor.pan + jitter(rng, anchor.pan_jitter),
        });

        for strum in &pattern.strums {
            let strum_start = bar_start + strum.beat * beat;
            let duration = (strum.sustain_beats * beat).max(pattern.min_duration);

            for (n, note) in voicing.notes().iter().enumerate() {
                events.push(PluckEvent {
                    start: strum_start + n as f64 * pattern.stagger,
                    frequency: note_to_freq(note)?,
                    duration,
                    amplitude: strum.amplitude * pattern.amplitude_falloff.powi(n as i32),
                    pan: pattern.pan_start
                        + pattern.pan_step * n as f64
                        + jitter(rng, pattern.pan_jitter),
                });
            }
        }
    }

    Ok(events)
}
