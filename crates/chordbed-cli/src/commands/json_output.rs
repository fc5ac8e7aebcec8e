//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; these are the shapes it prints.

use anyhow::{Context, Result};
use chordbed_backend_audio::AudioError;
use chordbed_spec::SpecError;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Backend and table errors pass their own codes through (`E00x`, `AUDIO_00x`).
pub mod error_codes {
    /// `--only` filter matched no loop
    pub const NO_MATCH: &str = "CLI_001";
    /// Existing output file could not be read
    pub const FILE_READ: &str = "CLI_002";
    /// Existing output file is not a parseable WAV
    pub const INVALID_WAV: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Loop filename the error relates to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            suggestion: None,
        }
    }

    /// Sets the loop filename for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&SpecError> for JsonError {
    fn from(err: &SpecError) -> Self {
        JsonError::new(err.code(), err.to_string())
    }
}

impl From<&AudioError> for JsonError {
    fn from(err: &AudioError) -> Self {
        JsonError::new(err.code(), err.to_string())
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}
