//! Verify command implementation
//!
//! Re-renders each selected loop in memory and compares its PCM hash with the
//! file already on disk. Rendering is deterministic, so any difference means
//! the file is stale, hand-edited, or was produced by a different build.

use anyhow::Result;
use chordbed_backend_audio::wav::compute_pcm_hash;
use chordbed_backend_audio::{render_loop, RenderParams};
use chordbed_spec::{LoopSpec, LoopTable, VoicingTable};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError};
use super::select_loops;

/// Outcome of checking one loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    /// File PCM matches a fresh render
    Match,
    /// File PCM differs from a fresh render
    Mismatch,
    /// No file at the expected path
    Missing,
    /// File exists but has no readable WAV data chunk
    Invalid,
    /// File exists but could not be read
    Unreadable,
}

impl VerifyStatus {
    fn label(self) -> colored::ColoredString {
        match self {
            VerifyStatus::Match => "MATCH".green(),
            VerifyStatus::Mismatch => "MISMATCH".red().bold(),
            VerifyStatus::Missing => "MISSING".yellow().bold(),
            VerifyStatus::Invalid => "INVALID".red().bold(),
            VerifyStatus::Unreadable => "UNREADABLE".red().bold(),
        }
    }
}

/// Verification result for one loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEntry {
    /// Loop filename
    pub filename: String,
    /// Path checked
    pub path: String,
    /// Outcome
    pub status: VerifyStatus,
    /// PCM hash of a fresh render
    pub expected_hash: String,
    /// PCM hash of the file on disk, when it could be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hash: Option<String>,
}

/// JSON output for the verify command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutput {
    /// Whether every selected loop matched
    pub success: bool,
    /// Output root directory
    pub out_root: String,
    /// Per-loop results, in table order
    pub results: Vec<VerifyEntry>,
    /// Errors that prevented or interrupted verification
    pub errors: Vec<JsonError>,
}

/// Run the verify command
///
/// # Arguments
/// * `out_root` - Output root directory (default: current directory)
/// * `only` - Optional filename substring filter
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 all match, 1 any mismatch, missing file or configuration error,
/// 2 render failure
pub fn run(out_root: Option<&str>, only: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let out_root = out_root.unwrap_or(".");

    if !json_output {
        println!("{} {}", "Verifying:".cyan().bold(), out_root);
    }

    let (output, code) = verify_loops(Path::new(out_root), only);

    if json_output {
        print_json(&output)?;
    } else {
        print_results(&output);
    }

    Ok(code)
}

/// Checks the selected loops against the files under `out_root`.
pub fn verify_loops(out_root: &Path, only: Option<&str>) -> (VerifyOutput, ExitCode) {
    let mut output = VerifyOutput {
        success: false,
        out_root: out_root.display().to_string(),
        results: Vec::new(),
        errors: Vec::new(),
    };

    let voicings = VoicingTable::standard();
    let table = LoopTable::standard();

    if let Err(e) = table.validate(&voicings) {
        output.errors.push(JsonError::from(&e));
        return (output, ExitCode::from(1));
    }

    let selected = match select_loops(&table, only) {
        Ok(selected) => selected,
        Err(e) => {
            output.errors.push(e);
            return (output, ExitCode::from(1));
        }
    };

    let params = RenderParams::default();
    for spec in selected {
        let expected = match render_loop(spec, &voicings, &params) {
            Ok(result) => result.wav.pcm_hash,
            Err(e) => {
                output
                    .errors
                    .push(JsonError::from(&e).with_file(spec.filename.as_str()));
                return (output, ExitCode::from(2));
            }
        };

        let entry = check_file(spec, out_root, expected, &mut output.errors);
        output.results.push(entry);
    }

    output.success =
        output.errors.is_empty() && output.results.iter().all(|r| r.status == VerifyStatus::Match);
    let code = if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };
    (output, code)
}

fn check_file(
    spec: &LoopSpec,
    out_root: &Path,
    expected_hash: String,
    errors: &mut Vec<JsonError>,
) -> VerifyEntry {
    let path = spec.output_path(out_root);
    let mut entry = VerifyEntry {
        filename: spec.filename.clone(),
        path: path.display().to_string(),
        status: VerifyStatus::Missing,
        expected_hash,
        actual_hash: None,
    };

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return entry,
        Err(e) => {
            errors.push(
                JsonError::new(
                    error_codes::FILE_READ,
                    format!("Failed to read {}: {}", path.display(), e),
                )
                .with_file(spec.filename.as_str()),
            );
            entry.status = VerifyStatus::Unreadable;
            return entry;
        }
    };

    match compute_pcm_hash(&bytes) {
        Some(actual) => {
            entry.status = if actual == entry.expected_hash {
                VerifyStatus::Match
            } else {
                VerifyStatus::Mismatch
            };
            entry.actual_hash = Some(actual);
        }
        None => {
            errors.push(
                JsonError::new(error_codes::INVALID_WAV, "file has no readable WAV data chunk")
                    .with_file(spec.filename.as_str()),
            );
            entry.status = VerifyStatus::Invalid;
        }
    }

    entry
}

fn print_results(output: &VerifyOutput) {
    for entry in &output.results {
        println!("  {:<10} {}", entry.status.label(), entry.filename);
        if entry.status == VerifyStatus::Mismatch {
            println!("    {} {}", "expected:".dimmed(), entry.expected_hash);
            if let Some(actual) = &entry.actual_hash {
                println!("    {} {}", "actual:  ".dimmed(), actual);
            }
        }
    }

    for error in &output.errors {
        println!("  {} [{}] {}", "✗".red(), error.code, error.message);
    }

    let matched = output
        .results
        .iter()
        .filter(|r| r.status == VerifyStatus::Match)
        .count();
    if output.success {
        println!(
            "\n{} {}/{} loops match",
            "PASSED".green().bold(),
            matched,
            output.results.len()
        );
    } else {
        println!(
            "\n{} {}/{} loops match",
            "FAILED".red().bold(),
            matched,
            output.results.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::generate::generate_loops;
    use chordbed_spec::LIBRARY_DIR;

    const FILE: &str = "gtr_dumble_ambient_84_Gsus2_cycle07.wav";

    #[test]
    fn verify_after_generate_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let (_, code) = generate_loops(tmp.path(), Some("cycle07"), false);
        assert_eq!(code, ExitCode::SUCCESS);

        let (output, code) = verify_loops(tmp.path(), Some("cycle07"));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.success);
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].status, VerifyStatus::Match);
        assert_eq!(
            output.results[0].actual_hash.as_deref(),
            Some(output.results[0].expected_hash.as_str())
        );
    }

    #[test]
    fn verify_detects_missing_and_modified() {
        let tmp = tempfile::tempdir().unwrap();
        let (output, code) = verify_loops(tmp.path(), Some("cycle07"));
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(output.results[0].status, VerifyStatus::Missing);

        generate_loops(tmp.path(), Some("cycle07"), false);
        let path = tmp.path().join(LIBRARY_DIR).join(FILE);
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        std::fs::write(&path, &bytes).unwrap();

        let (output, code) = verify_loops(tmp.path(), Some("cycle07"));
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(output.results[0].status, VerifyStatus::Mismatch);
    }

    #[test]
    fn verify_flags_non_wav_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(LIBRARY_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(FILE), b"garbage").unwrap();

        let (output, code) = verify_loops(tmp.path(), Some("cycle07"));
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(output.results[0].status, VerifyStatus::Invalid);
        assert_eq!(output.errors[0].code, error_codes::INVALID_WAV);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&VerifyStatus::Mismatch).unwrap(),
            "\"mismatch\""
        );
    }
}
