//! `go test -bench` output.
//!
//! Contract, one result per line:
//!
//! ```text
//! BenchmarkFib20-8           30000             41653 ns/op
//! BenchmarkAlloc-8         1000000              1052 ns/op     256 B/op     4 allocs/op
//! ```
//!
//! The optional `-<procs>` suffix is removed from the name and reported in
//! `extra` together with the iteration count. Only the first measurement
//! column is kept; memory columns are ignored.

use crate::error::ParseError;
use crate::number::parse_finite;
use crate::result::BenchmarkResult;
use once_cell::sync::Lazy;
use regex::Regex;

static BENCH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Benchmark\w+)(-\d+)?\s+(\d+)\s+([0-9.]+)\s+(\S+)")
        .expect("go bench pattern is valid")
});

/// Parse `go test -bench` output.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    Ok(output.lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<BenchmarkResult> {
    let caps = BENCH_LINE.captures(line)?;
    let value = parse_finite(&caps[4])?;

    let mut extra = format!("{} times", &caps[3]);
    if let Some(procs) = caps.get(2) {
        extra.push_str(&format!("\n{} procs", &procs.as_str()[1..]));
    }

    Some(BenchmarkResult::new(&caps[1], value, &caps[5]).with_extra(extra))
}
