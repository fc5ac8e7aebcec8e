//! List command implementation
//!
//! Prints the loop table and the voicings it draws from.

use anyhow::Result;
use chordbed_backend_audio::generate::{loop_frames, DEFAULT_SAMPLE_RATE};
use chordbed_spec::{loop_seed, LoopTable, Voicing, VoicingTable, BARS_PER_LOOP};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::json_output::print_json;

/// One loop table entry.
#[derive(Debug, Clone, Serialize)]
pub struct ListedLoop {
    /// Output filename
    pub filename: String,
    /// Tempo in BPM
    pub bpm: u32,
    /// Chord progression cycled over the bars
    pub progression: Vec<String>,
    /// Chord played in each bar
    pub bars: Vec<String>,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Stereo frames at the default sample rate
    pub num_frames: usize,
    /// Seed derived from the filename
    pub seed: u32,
}

/// JSON output for the list command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Loops in table order
    pub loops: Vec<ListedLoop>,
    /// Voicing table
    pub voicings: Vec<Voicing>,
}

/// Builds the list output from the standard tables.
pub fn list_output() -> ListOutput {
    let loops = LoopTable::standard()
        .iter()
        .map(|spec| ListedLoop {
            filename: spec.filename.clone(),
            bpm: spec.bpm,
            progression: spec.progression.clone(),
            bars: (0..BARS_PER_LOOP)
                .filter_map(|bar| spec.chord_for_bar(bar))
                .map(str::to_string)
                .collect(),
            duration_seconds: spec.duration_seconds(),
            num_frames: loop_frames(spec, DEFAULT_SAMPLE_RATE),
            seed: loop_seed(&spec.filename),
        })
        .collect();

    ListOutput {
        loops,
        voicings: VoicingTable::standard().iter().copied().collect(),
    }
}

/// Run the list command
///
/// # Returns
/// Exit code: always 0
pub fn run(json_output: bool) -> Result<ExitCode> {
    let output = list_output();

    if json_output {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} ({})", "Loops:".cyan().bold(), output.loops.len());
    for entry in &output.loops {
        println!(
            "  {} {} {}",
            entry.filename,
            format!("{} BPM, {:.3}s", entry.bpm, entry.duration_seconds).dimmed(),
            entry.progression.join(" → ")
        );
    }

    println!("\n{} ({})", "Voicings:".cyan().bold(), output.voicings.len());
    for voicing in &output.voicings {
        println!("  {:<8} {}", voicing.label, voicing.notes.join(" "));
    }

    Ok(ExitCode::SUCCESS)
}
