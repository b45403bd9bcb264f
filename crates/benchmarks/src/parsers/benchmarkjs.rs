//! Benchmark.js console output.
//!
//! Contract, one result per line:
//!
//! ```text
//! fib(20) x 11,465 ops/sec ±1.12% (91 runs sampled)
//! createObjectBuffer with 200 comments x 81.61 ops/sec ±1.70% (69 runs sampled)
//! ```
//!
//! The name is everything before the last ` x `, so names may contain
//! spaces. The range keeps its `±N%` token as printed (`+-N%` is accepted
//! too) and the sample count goes to `extra`. `(N samples)` is accepted as
//! an alternative to `(N runs sampled)`.

use super::strip_commas;
use crate::error::ParseError;
use crate::number::parse_finite;
use crate::result::BenchmarkResult;
use once_cell::sync::Lazy;
use regex::Regex;

static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ x ([0-9,.]+)\s+(\S+)\s+((?:±|\+-)[^%]+%) \((\d+) (?:runs sampled|samples)\)$")
        .expect("benchmark.js pattern is valid")
});

/// Parse Benchmark.js output.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    Ok(output.lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<BenchmarkResult> {
    let idx = line.rfind(" x ")?;
    let (name, rest) = line.split_at(idx);
    if name.trim().is_empty() {
        return None;
    }
    let caps = MEASUREMENT.captures(rest)?;
    let value = parse_finite(&strip_commas(&caps[1]))?;

    Some(
        BenchmarkResult::new(name, value, &caps[2])
            .with_range(&caps[3])
            .with_extra(format!("{} samples", &caps[4])),
    )
}
