//! Per-tool output parsers.
//!
//! Each parser is a pure function from raw tool output to the results it
//! contains, in order of appearance. Parsers hold no state; the compiled
//! patterns they share are immutable statics, so any number of payloads
//! can be parsed concurrently.
//!
//! A parser distinguishes three outcomes: entries found, a payload of the
//! wrong shape ([`ParseError::NotJson`] / [`ParseError::Malformed`]), and a
//! well-formed payload without any usable entry ([`ParseError::Empty`]).
//! Entries whose value is not a finite number are dropped.

pub mod benchmarkjs;
pub mod cargo;
pub mod catch2;
pub mod go;
pub mod googlecpp;
pub mod pytest;

use crate::error::ParseError;
use crate::result::BenchmarkResult;
use benchgate_core::Tool;

/// Signature shared by every format parser.
pub type ParserFn = fn(&str) -> Result<Vec<BenchmarkResult>, ParseError>;

/// Parser bound to a tool.
pub fn parser_for(tool: Tool) -> ParserFn {
    match tool {
        Tool::Cargo => cargo::parse,
        Tool::Go => go::parse,
        Tool::Benchmarkjs => benchmarkjs::parse,
        Tool::Pytest => pytest::parse,
        Tool::Googlecpp => googlecpp::parse,
        Tool::Catch2 => catch2::parse,
    }
}

/// Parse `output` with the tool's parser, failing when nothing was found.
pub fn parse(tool: Tool, output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    let benches = parser_for(tool)(output)?;
    if benches.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(benches)
}

/// Strip thousands separators such as in `1,431,759`.
pub(crate) fn strip_commas(token: &str) -> String {
    token.replace(',', "")
}

/// JSON number as a finite `f64`; `None` when it overflows.
pub(crate) fn finite(number: &serde_json::Number) -> Option<f64> {
    number.as_f64().filter(|v| v.is_finite())
}
