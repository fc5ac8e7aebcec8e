//! CLI command implementations

pub mod generate;
pub mod json_output;
pub mod list;
pub mod verify;

use chordbed_spec::{LoopSpec, LoopTable};

use json_output::{error_codes, JsonError};

/// Selects the table entries a command should act on.
///
/// With no filter every entry is returned in table order. A filter that
/// matches nothing is an error rather than an empty success.
pub fn select_loops<'a>(
    table: &'a LoopTable,
    only: Option<&'a str>,
) -> Result<Vec<&'a LoopSpec>, JsonError> {
    let selected: Vec<&LoopSpec> = match only {
        Some(pattern) => table.matching(pattern).collect(),
        None => table.iter().collect(),
    };

    if selected.is_empty() {
        let pattern = only.unwrap_or_default();
        return Err(JsonError::new(
            error_codes::NO_MATCH,
            format!("no loop filename contains '{}'", pattern),
        )
        .with_suggestion("run `chordbed list` to see available filenames"));
    }

    Ok(selected)
}
