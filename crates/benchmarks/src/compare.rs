//! Regression comparator.
//!
//! Pairs the results of a current run with a baseline run by name and
//! computes a regression ratio for every pair. Ratios are oriented so that
//! a value above `1` always means the current run is worse, whatever the
//! tool's direction.

use crate::result::{Benchmark, BenchmarkResult};
use benchgate_core::Direction;
use std::collections::HashMap;

/// One current result paired with the baseline result of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedEntry<'a> {
    /// Result from the current run.
    pub current: &'a BenchmarkResult,
    /// Result from the baseline run.
    pub baseline: &'a BenchmarkResult,
    /// Regression ratio; above `1` is a regression.
    pub ratio: f64,
}

impl ComparedEntry<'_> {
    /// Shared benchmark name.
    pub fn name(&self) -> &str {
        &self.current.name
    }
}

/// Read-only outcome of comparing two runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<'a> {
    /// Current run.
    pub current: &'a Benchmark,
    /// Baseline run.
    pub baseline: &'a Benchmark,
    /// Matched pairs, in current-run order.
    pub entries: Vec<ComparedEntry<'a>>,
    /// Current results without a baseline counterpart, in current-run order.
    pub unmatched: Vec<&'a BenchmarkResult>,
}

/// Compare `current` against `baseline`.
///
/// Results present in only one of the runs are not compared. The direction
/// policy is taken from `current.tool`; a tool mismatch between the runs is
/// not checked.
pub fn compare<'a>(current: &'a Benchmark, baseline: &'a Benchmark) -> Comparison<'a> {
    let mut by_name: HashMap<&str, &BenchmarkResult> = HashMap::with_capacity(baseline.benches.len());
    for bench in &baseline.benches {
        by_name.entry(bench.name.as_str()).or_insert(bench);
    }

    let direction = current.tool.direction();
    let mut entries = Vec::new();
    let mut unmatched = Vec::new();
    for bench in &current.benches {
        match by_name.get(bench.name.as_str()) {
            Some(&prev) => entries.push(ComparedEntry {
                current: bench,
                baseline: prev,
                ratio: ratio(direction, prev.value, bench.value),
            }),
            None => unmatched.push(bench),
        }
    }

    Comparison {
        current,
        baseline,
        entries,
        unmatched,
    }
}

/// Directional regression ratio between a baseline and a current value.
pub fn ratio(direction: Direction, baseline: f64, current: f64) -> f64 {
    if baseline == 0.0 && current == 0.0 {
        return 1.0;
    }
    match direction {
        Direction::SmallerIsBetter => current / baseline,
        Direction::BiggerIsBetter => baseline / current,
    }
}
