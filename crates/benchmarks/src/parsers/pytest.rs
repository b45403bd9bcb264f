//! pytest-benchmark JSON output (`--benchmark-json`).
//!
//! Contract: a JSON object with a `benchmarks` array whose entries carry
//! `fullname` (or `name`) and `stats.{mean, stddev, rounds}` in seconds,
//! plus the optional `stats.ops`. Results are throughput: `value` is
//! `stats.ops`, or `1 / mean` when `ops` is absent, in `iter/sec`. An
//! entry whose statistics do not fit a finite `f64` is dropped.

use super::finite;
use crate::error::ParseError;
use crate::number::display;
use crate::result::BenchmarkResult;
use benchgate_core::Tool;
use serde::Deserialize;
use serde_json::Number;

#[derive(Debug, Deserialize)]
struct PytestOutput {
    #[serde(default)]
    benchmarks: Vec<PytestBenchmark>,
}

#[derive(Debug, Deserialize)]
struct PytestBenchmark {
    #[serde(default)]
    fullname: Option<String>,
    #[serde(default)]
    name: Option<String>,
    stats: PytestStats,
}

#[derive(Debug, Deserialize)]
struct PytestStats {
    mean: Number,
    stddev: Number,
    rounds: u64,
    #[serde(default)]
    ops: Option<Number>,
}

/// Parse pytest-benchmark JSON.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    let parsed: PytestOutput = serde_json::from_str(output).map_err(|e| ParseError::NotJson {
        tool: Tool::Pytest,
        generated_by: "--benchmark-json option",
        reason: e.to_string(),
    })?;

    Ok(parsed.benchmarks.into_iter().filter_map(to_result).collect())
}

fn to_result(bench: PytestBenchmark) -> Option<BenchmarkResult> {
    let name = bench.fullname.or(bench.name).filter(|n| !n.trim().is_empty())?;
    let stats = bench.stats;
    let mean = finite(&stats.mean)?;
    let stddev = finite(&stats.stddev)?;
    let value = match &stats.ops {
        Some(ops) => finite(ops)?,
        None => 1.0 / mean,
    };
    if !value.is_finite() {
        return None;
    }

    let (mean, mean_unit) = human_readable_seconds(mean);
    Some(
        BenchmarkResult::new(name, value, "iter/sec")
            .with_range(format!("stddev: {}", display(stddev)))
            .with_extra(format!("mean: {} {mean_unit}\nrounds: {}", display(mean), stats.rounds)),
    )
}

/// Scale a duration in seconds to the largest unit keeping it at least 1.
fn human_readable_seconds(seconds: f64) -> (f64, &'static str) {
    if seconds < 1.0e-6 {
        (seconds * 1e9, "nsec")
    } else if seconds < 1.0e-3 {
        (seconds * 1e6, "usec")
    } else if seconds < 1.0 {
        (seconds * 1e3, "msec")
    } else {
        (seconds, "sec")
    }
}
