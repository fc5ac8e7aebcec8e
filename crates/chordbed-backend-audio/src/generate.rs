//! Main entry point for loop rendering.
//!
//! Takes one loop entry and renders it to WAV bytes deterministically: the
//! same filename, tempo and progression always produce the same PCM.

use std::fs;
use std::path::{Path, PathBuf};

use chordbed_spec::{loop_seed, LoopSpec, VoicingTable};

use crate::error::{AudioError, AudioResult};
use crate::loop_processing::apply_edge_fade;
use crate::mixer::{normalize_peak, peak, PeakNormalize, StereoOutput};
use crate::modulation::Breathing;
use crate::rng::{create_stream_rng, PLUCK_STREAM, SEQUENCE_STREAM};
use crate::sequencer::{sequence_loop, StrumPattern};
use crate::synthesis::PluckVoice;
use crate::wav::WavResult;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Post-processing applied to the mixed loop, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessParams {
    /// Slow amplitude drift.
    pub breathing: Breathing,
    /// Length of the linear fade at each loop edge, in seconds.
    pub edge_fade_seconds: f64,
    /// Final peak normalization.
    pub normalize: PeakNormalize,
}

impl Default for PostProcessParams {
    fn default() -> Self {
        Self {
            breathing: Breathing::default(),
            edge_fade_seconds: 0.02,
            normalize: PeakNormalize::default(),
        }
    }
}

/// Everything that shapes a render besides the loop entry itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// String model used for every note.
    pub voice: PluckVoice,
    /// How each bar is played.
    pub pattern: StrumPattern,
    /// Mix-bus processing.
    pub post: PostProcessParams,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            voice: PluckVoice::default(),
            pattern: StrumPattern::default(),
            post: PostProcessParams::default(),
        }
    }
}

impl RenderParams {
    /// Rejects a zero sample rate and negative or non-positive tuning values.
    pub fn validate(&self) -> AudioResult<()> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if self.post.edge_fade_seconds < 0.0 {
            return Err(AudioError::invalid_param(
                "edge_fade_seconds",
                format!("must be non-negative, got {}", self.post.edge_fade_seconds),
            ));
        }
        let normalize = &self.post.normalize;
        if normalize.target <= 0.0 || normalize.ceiling <= 0.0 || normalize.floor <= 0.0 {
            return Err(AudioError::invalid_param(
                "normalize",
                "target, ceiling and floor must be positive",
            ));
        }
        if self.pattern.stagger < 0.0 || self.pattern.min_duration < 0.0 {
            return Err(AudioError::invalid_param(
                "pattern",
                "stagger and min_duration must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Result of rendering one loop.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Output filename from the loop entry.
    pub filename: String,
    /// Encoded WAV file.
    pub wav: WavResult,
    /// Seed derived from the filename.
    pub seed: u32,
    /// Number of note events rendered.
    pub num_events: usize,
    /// Peak level before normalization.
    pub pre_normalize_peak: f64,
    /// Gain applied by normalization.
    pub gain: f64,
    /// Samples faded at each loop edge.
    pub edge_fade_samples: usize,
}

/// Number of frames for a loop at a sample rate.
pub fn loop_frames(spec: &LoopSpec, sample_rate: u32) -> usize {
    (spec.duration_seconds() * sample_rate as f64).round() as usize
}

/// Renders a loop entry to WAV bytes.
///
/// # Arguments
/// * `spec` - Loop entry to render
/// * `voicings` - Table the progression's chords are resolved against
/// * `params` - Render parameters
///
/// # Returns
/// The encoded WAV and render metadata. Nothing is written to disk.
pub fn render_loop(
    spec: &LoopSpec,
    voicings: &VoicingTable,
    params: &RenderParams,
) -> AudioResult<GenerateResult> {
    params.validate()?;
    spec.validate(voicings)?;

    let sample_rate = params.sample_rate as f64;
    let num_frames = loop_frames(spec, params.sample_rate);
    if num_frames == 0 {
        return Err(AudioError::InvalidDuration {
            duration: spec.duration_seconds(),
        });
    }

    let seed = loop_seed(&spec.filename);
    let mut sequence_rng = create_stream_rng(seed, SEQUENCE_STREAM);
    let mut pluck_rng = create_stream_rng(seed, PLUCK_STREAM);

    let events = sequence_loop(spec, voicings, &params.pattern, &mut sequence_rng)?;

    let mut stereo = StereoOutput::new(num_frames);
    for event in &events {
        params
            .voice
            .render_into(&mut stereo, event, sample_rate, &mut pluck_rng);
    }

    params.post.breathing.apply(&mut stereo, sample_rate);
    let edge_fade_samples = apply_edge_fade(&mut stereo, params.post.edge_fade_seconds, sample_rate);
    let pre_normalize_peak = peak(&stereo);
    let gain = normalize_peak(&mut stereo, &params.post.normalize);

    Ok(GenerateResult {
        filename: spec.filename.clone(),
        wav: WavResult::from_stereo(&stereo, params.sample_rate),
        seed,
        num_events: events.len(),
        pre_normalize_peak,
        gain,
        edge_fade_samples,
    })
}

/// Writes a rendered loop to `<out_root>/assets/chords/library/<filename>`.
///
/// Parent directories are created as needed and an existing file is
/// overwritten.
///
/// # Returns
/// The path written.
pub fn write_loop(spec: &LoopSpec, result: &GenerateResult, out_root: &Path) -> AudioResult<PathBuf> {
    let path = spec.output_path(out_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.wav.wav_data)?;
    Ok(path)
}
