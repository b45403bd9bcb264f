//! Error types for extraction.

use benchgate_core::{Tool, UnknownTool};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a format parser.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not the JSON document the tool is expected to emit.
    #[error("Output file for '{tool}' must be JSON file generated by {generated_by}: {reason}")]
    NotJson {
        /// Tool whose parser rejected the payload.
        tool: Tool,
        /// How the tool is told to produce JSON output.
        generated_by: &'static str,
        /// Underlying decoder message.
        reason: String,
    },

    /// The payload has the right syntax but an unexpected structure.
    #[error("Malformed '{tool}' output: {detail}")]
    Malformed {
        /// Tool whose parser rejected the payload.
        tool: Tool,
        /// What was wrong, including line numbers where known.
        detail: String,
    },

    /// Nothing usable was found.
    #[error("no benchmark result found")]
    Empty,
}

/// Errors produced by the extraction dispatcher.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The tool identifier is not supported.
    #[error(transparent)]
    UnsupportedTool(#[from] UnknownTool),

    /// The payload could not be read.
    #[error("Cannot read benchmark output '{}': {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload does not match the tool's expected syntax.
    #[error(transparent)]
    MalformedInput(ParseError),

    /// The payload parsed but yielded no usable entries.
    #[error("No benchmark result was found in {source_name}. Benchmark output was '{output}'")]
    EmptyResult {
        /// Path or label of the payload.
        source_name: String,
        /// Raw payload, echoed for diagnosis.
        output: String,
    },
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
