//! Normalized benchmark record types.
//!
//! Every supported tool's output is reduced to a [`Benchmark`]: the commit
//! and tool it came from plus an ordered list of [`BenchmarkResult`]s.

use benchgate_core::{Commit, Tool};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One measured metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name; the key used to match results across runs.
    pub name: String,
    /// Measured value. Always finite.
    pub value: f64,
    /// Unit of `value`, display only.
    pub unit: String,
    /// Variance description such as `± 20`, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Free-form multi-line annotation, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl BenchmarkResult {
    /// Create a result without range or extra annotations.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            range: None,
            extra: None,
        }
    }

    /// Attach a range description.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Attach an extra annotation.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}

/// One run's normalized result set.
///
/// Created once per extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Revision the run was measured on.
    pub commit: Commit,
    /// Extraction time in milliseconds since the Unix epoch.
    pub date: i64,
    /// Tool that produced `benches`.
    pub tool: Tool,
    /// Results in the order they appeared in the tool output.
    pub benches: Vec<BenchmarkResult>,
}

impl Benchmark {
    /// Create a benchmark record stamped with the current time.
    pub fn new(commit: Commit, tool: Tool, benches: Vec<BenchmarkResult>) -> Self {
        Self {
            commit,
            date: Utc::now().timestamp_millis(),
            tool,
            benches,
        }
    }
}
