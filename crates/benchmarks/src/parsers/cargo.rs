//! `cargo bench` (libtest) output.
//!
//! Contract, one result per line:
//!
//! ```text
//! test bench_fib_20 ... bench:      37,174 ns/iter (+/- 7,527)
//! ```
//!
//! Thousands separators are stripped. The value becomes `value`, the
//! number after `+/-` becomes the range `± <n>`; the unit is `ns/iter`.

use super::strip_commas;
use crate::error::ParseError;
use crate::number::parse_finite;
use crate::result::BenchmarkResult;
use once_cell::sync::Lazy;
use regex::Regex;

static BENCH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^test (\S.*?)\s+\.\.\. bench:\s+([0-9,.]+) ns/iter \(\+/- ([0-9,.]+)\)$")
        .expect("cargo bench pattern is valid")
});

/// Parse libtest bencher output.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    Ok(output.lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<BenchmarkResult> {
    let caps = BENCH_LINE.captures(line)?;
    let value = parse_finite(&strip_commas(&caps[2]))?;
    let range = strip_commas(&caps[3]);
    Some(BenchmarkResult::new(caps[1].trim(), value, "ns/iter").with_range(format!("± {range}")))
}
