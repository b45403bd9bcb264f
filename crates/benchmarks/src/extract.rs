//! Extraction dispatcher.
//!
//! Turns one raw tool payload into a normalized [`Benchmark`]: validate the
//! tool, read the payload, run the tool's parser and stamp the result with
//! the commit, the current time and the tool.

use crate::error::{ExtractError, ParseError, Result};
use crate::io::read_payload;
use crate::parsers;
use crate::result::Benchmark;
use benchgate_core::{Commit, Tool};
use std::path::Path;
use tracing::debug;

/// Extract a benchmark record from the output file of `tool_id`.
///
/// # Errors
///
/// - [`ExtractError::UnsupportedTool`] when `tool_id` is not a known tool
/// - [`ExtractError::Io`] when the file cannot be read
/// - [`ExtractError::MalformedInput`] when the payload has the wrong shape
/// - [`ExtractError::EmptyResult`] when no result could be found
pub fn extract(path: impl AsRef<Path>, tool_id: &str, commit: Commit) -> Result<Benchmark> {
    let tool: Tool = tool_id.parse()?;
    let path = path.as_ref();
    let output = read_payload(path)?;
    extract_str(&path.display().to_string(), &output, tool, commit)
}

/// Extract a benchmark record from an in-memory payload.
///
/// `source_name` only labels the payload in error messages.
pub fn extract_str(source_name: &str, output: &str, tool: Tool, commit: Commit) -> Result<Benchmark> {
    let benches = parsers::parse(tool, output).map_err(|err| match err {
        ParseError::Empty => ExtractError::EmptyResult {
            source_name: source_name.to_string(),
            output: output.to_string(),
        },
        other => ExtractError::MalformedInput(other),
    })?;

    debug!(
        tool = %tool,
        source = source_name,
        benches = benches.len(),
        "Benchmark result was extracted"
    );

    Ok(Benchmark::new(commit, tool, benches))
}
