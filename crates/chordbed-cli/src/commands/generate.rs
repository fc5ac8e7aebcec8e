//! Generate command implementation
//!
//! Renders the loop table (or a filtered subset) and writes each loop under
//! `<out_root>/assets/chords/library/`. The whole table is validated before
//! anything is rendered, and rendering stops at the first failure.

use anyhow::Result;
use chordbed_backend_audio::{render_loop, write_loop, GenerateResult, RenderParams};
use chordbed_spec::{LoopSpec, LoopTable, VoicingTable};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use super::json_output::{print_json, JsonError};
use super::select_loops;

/// One loop written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLoop {
    /// Output filename
    pub filename: String,
    /// Full path written
    pub path: String,
    /// Tempo in BPM
    pub bpm: u32,
    /// Chord progression cycled over the bars
    pub progression: Vec<String>,
    /// Seed derived from the filename
    pub seed: u32,
    /// Stereo frames in the file
    pub num_frames: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Note events rendered
    pub num_events: usize,
    /// Peak level before normalization
    pub peak_before_normalize: f64,
    /// Gain applied by normalization
    pub normalize_gain: f64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// Render and write time in milliseconds
    pub duration_ms: u64,
}

impl GeneratedLoop {
    fn new(spec: &LoopSpec, result: &GenerateResult, path: &Path, elapsed: Duration) -> Self {
        Self {
            filename: result.filename.clone(),
            path: path.display().to_string(),
            bpm: spec.bpm,
            progression: spec.progression.clone(),
            seed: result.seed,
            num_frames: result.wav.num_frames,
            duration_seconds: result.wav.duration_seconds(),
            num_events: result.num_events,
            peak_before_normalize: result.pre_normalize_peak,
            normalize_gain: result.gain,
            pcm_hash: result.wav.pcm_hash.clone(),
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

/// JSON output for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether every selected loop was written
    pub success: bool,
    /// Output root directory
    pub out_root: String,
    /// Loops written, in table order
    pub generated: Vec<GeneratedLoop>,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Total runtime in seconds
    pub runtime_seconds: f64,
}

impl GenerateOutput {
    fn new(out_root: &Path) -> Self {
        Self {
            success: false,
            out_root: out_root.display().to_string(),
            generated: Vec::new(),
            errors: Vec::new(),
            runtime_seconds: 0.0,
        }
    }

    fn finish(mut self, start: Instant, code: ExitCode) -> (Self, ExitCode) {
        self.success = self.errors.is_empty();
        self.runtime_seconds = start.elapsed().as_secs_f64();
        (self, code)
    }
}

/// Run the generate command
///
/// # Arguments
/// * `out_root` - Output root directory (default: current directory)
/// * `only` - Optional filename substring filter
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 configuration error or unmatched filter, 2 generation error
pub fn run(out_root: Option<&str>, only: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let out_root = out_root.unwrap_or(".");

    if !json_output {
        println!("{} {}", "Output root:".cyan().bold(), out_root);
        if let Some(pattern) = only {
            println!("{} {}", "Filter:".cyan().bold(), pattern);
        }
    }

    let (output, code) = generate_loops(Path::new(out_root), only, !json_output);

    if json_output {
        print_json(&output)?;
    } else {
        print_summary(&output);
    }

    Ok(code)
}

/// Renders and writes the selected loops.
///
/// When `progress` is set, a colored status line is printed per loop.
pub fn generate_loops(
    out_root: &Path,
    only: Option<&str>,
    progress: bool,
) -> (GenerateOutput, ExitCode) {
    let start = Instant::now();
    let mut output = GenerateOutput::new(out_root);

    let voicings = VoicingTable::standard();
    let table = LoopTable::standard();

    if let Err(e) = table.validate(&voicings) {
        output.errors.push(JsonError::from(&e));
        return output.finish(start, ExitCode::from(1));
    }

    let selected = match select_loops(&table, only) {
        Ok(selected) => selected,
        Err(e) => {
            output.errors.push(e);
            return output.finish(start, ExitCode::from(1));
        }
    };

    if progress {
        println!("{} {} loops\n", "Generating:".cyan().bold(), selected.len());
    }

    let params = RenderParams::default();
    for spec in selected {
        let loop_start = Instant::now();
        let written = render_loop(spec, &voicings, &params)
            .and_then(|result| write_loop(spec, &result, out_root).map(|path| (result, path)));

        match written {
            Ok((result, path)) => {
                let record = GeneratedLoop::new(spec, &result, &path, loop_start.elapsed());
                if progress {
                    println!(
                        "  {} {} {}",
                        "✓".green(),
                        record.filename,
                        format!("({}ms, {})", record.duration_ms, &record.pcm_hash[..16]).dimmed()
                    );
                }
                output.generated.push(record);
            }
            Err(e) => {
                if progress {
                    println!("  {} {}: {}", "✗".red(), spec.filename, e);
                }
                output
                    .errors
                    .push(JsonError::from(&e).with_file(spec.filename.as_str()));
                return output.finish(start, ExitCode::from(2));
            }
        }
    }

    output.finish(start, ExitCode::SUCCESS)
}

fn print_summary(output: &GenerateOutput) {
    if output.success {
        println!(
            "\n{} {} loops written {}",
            "SUCCESS".green().bold(),
            output.generated.len(),
            format!("in {:.2}s", output.runtime_seconds).dimmed()
        );
        return;
    }

    println!("\n{}", "GENERATION FAILED".red().bold());
    for error in &output.errors {
        let file = error
            .file
            .as_ref()
            .map(|f| format!(" {}", f))
            .unwrap_or_default();
        println!("  {} [{}]{}: {}", "✗".red(), error.code, file, error.message);
        if let Some(suggestion) = &error.suggestion {
            println!("    {} {}", "hint:".dimmed(), suggestion);
        }
    }
    if !output.generated.is_empty() {
        println!(
            "{} {} loops were written before the failure",
            "NOTE".yellow().bold(),
            output.generated.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordbed_backend_audio::wav::compute_pcm_hash;
    use chordbed_spec::LIBRARY_DIR;

    #[test]
    fn generate_single_loop() {
        let tmp = tempfile::tempdir().unwrap();

        let (output, code) = generate_loops(tmp.path(), Some("cycle04"), false);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.success);
        assert_eq!(output.generated.len(), 1);

        let record = &output.generated[0];
        assert_eq!(record.filename, "gtr_dumble_ambient_74_Dm9_cycle04.wav");
        assert_eq!(record.bpm, 74);
        assert_eq!(record.num_events, 72);

        let path = tmp.path().join(LIBRARY_DIR).join(&record.filename);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(compute_pcm_hash(&bytes).as_deref(), Some(record.pcm_hash.as_str()));

        // Nothing else was written.
        let entries = std::fs::read_dir(tmp.path().join(LIBRARY_DIR)).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn unmatched_filter_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();

        let (output, code) = generate_loops(tmp.path(), Some("no_such_loop"), false);
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.success);
        assert_eq!(output.errors[0].code, "CLI_001");
        assert!(!tmp.path().join("assets").exists());
    }

    #[test]
    fn write_failure_reports_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the output root should be makes directory creation fail.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let (output, code) = generate_loops(&blocker, Some("cycle12"), false);
        assert_eq!(code, ExitCode::from(2));
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].code, "AUDIO_004");
        assert_eq!(
            output.errors[0].file.as_deref(),
            Some("gtr_dumble_ambient_92_Cmaj9_cycle12.wav")
        );
    }

    #[test]
    fn output_serializes() {
        let tmp = tempfile::tempdir().unwrap();
        let (output, _) = generate_loops(tmp.path(), Some("none"), false);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["generated"], serde_json::json!([]));
        assert_eq!(json["errors"][0]["code"], "CLI_001");
    }
}
