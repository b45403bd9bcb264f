//! Google Benchmark JSON output (`--benchmark_format=json`).
//!
//! Contract: a JSON object with a `benchmarks` array whose entries carry
//! `name`, `real_time`, `cpu_time`, `iterations`, `threads` and an optional
//! `time_unit` (`ns` when absent). Times are normalized to nanoseconds so
//! every result is reported in `ns/iter`. An entry whose times do not fit a
//! finite `f64` is dropped.

use super::finite;
use crate::error::ParseError;
use crate::number::display;
use crate::result::BenchmarkResult;
use benchgate_core::Tool;
use serde::Deserialize;
use serde_json::Number;

#[derive(Debug, Deserialize)]
struct GoogleCppOutput {
    #[serde(default)]
    benchmarks: Vec<GoogleCppBenchmark>,
}

#[derive(Debug, Deserialize)]
struct GoogleCppBenchmark {
    name: String,
    real_time: Number,
    cpu_time: Number,
    iterations: u64,
    #[serde(default = "default_threads")]
    threads: u64,
    #[serde(default = "default_time_unit")]
    time_unit: String,
}

fn default_threads() -> u64 {
    1
}

fn default_time_unit() -> String {
    "ns".to_string()
}

/// Parse Google Benchmark JSON.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    let parsed: GoogleCppOutput = serde_json::from_str(output).map_err(|e| ParseError::NotJson {
        tool: Tool::Googlecpp,
        generated_by: "--benchmark_format=json option",
        reason: e.to_string(),
    })?;

    parsed
        .benchmarks
        .into_iter()
        .filter_map(|bench| to_result(bench).transpose())
        .collect()
}

fn to_result(bench: GoogleCppBenchmark) -> Result<Option<BenchmarkResult>, ParseError> {
    let scale = nanos_per_unit(&bench.time_unit).ok_or_else(|| ParseError::Malformed {
        tool: Tool::Googlecpp,
        detail: format!("unknown time_unit '{}' for benchmark '{}'", bench.time_unit, bench.name),
    })?;

    if bench.name.trim().is_empty() {
        return Ok(None);
    }
    let (Some(real_time), Some(cpu_time)) = (finite(&bench.real_time), finite(&bench.cpu_time)) else {
        return Ok(None);
    };
    let value = real_time * scale;
    if !value.is_finite() {
        return Ok(None);
    }

    let extra = format!(
        "iterations: {}\ncpu: {} ns\nthreads: {}",
        bench.iterations,
        display(cpu_time * scale),
        bench.threads
    );
    Ok(Some(BenchmarkResult::new(bench.name, value, "ns/iter").with_extra(extra)))
}

fn nanos_per_unit(unit: &str) -> Option<f64> {
    match unit {
        "ns" => Some(1.0),
        "us" => Some(1e3),
        "ms" => Some(1e6),
        "s" => Some(1e9),
        _ => None,
    }
}
