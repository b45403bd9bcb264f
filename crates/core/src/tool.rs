// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Supported benchmark tools.
//!
//! The tool a run was produced with decides two things end-to-end: which
//! output parser reads the raw payload, and in which direction result
//! values are compared. Both are bound to the closed [`Tool`] enum so that
//! adding a tool is an exhaustiveness error everywhere it matters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a tool identifier is not one of the supported tools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected tool: '{0}'")]
pub struct UnknownTool(pub String);

/// Whether a larger result value is an improvement or a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Values are durations; smaller is better.
    SmallerIsBetter,
    /// Values are throughputs; bigger is better.
    BiggerIsBetter,
}

/// Benchmark tool whose output can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// `cargo bench` (libtest bencher).
    Cargo,
    /// `go test -bench`.
    Go,
    /// Benchmark.js console output.
    Benchmarkjs,
    /// pytest-benchmark `--benchmark-json` output.
    Pytest,
    /// Google Benchmark `--benchmark_format=json` output.
    Googlecpp,
    /// Catch2 v2 console reporter.
    Catch2,
}

impl Tool {
    /// All supported tools, in declaration order.
    pub const ALL: [Tool; 6] = [
        Tool::Cargo,
        Tool::Go,
        Tool::Benchmarkjs,
        Tool::Pytest,
        Tool::Googlecpp,
        Tool::Catch2,
    ];

    /// Identifier used in configuration and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Cargo => "cargo",
            Tool::Go => "go",
            Tool::Benchmarkjs => "benchmarkjs",
            Tool::Pytest => "pytest",
            Tool::Googlecpp => "googlecpp",
            Tool::Catch2 => "catch2",
        }
    }

    /// Comparison direction for values produced by this tool.
    ///
    /// The direction is fixed per tool, not per unit: pytest results are
    /// always extracted as `iter/sec` and therefore compared as throughput.
    pub fn direction(&self) -> Direction {
        match self {
            Tool::Benchmarkjs | Tool::Pytest => Direction::BiggerIsBetter,
            Tool::Cargo | Tool::Go | Tool::Googlecpp | Tool::Catch2 => Direction::SmallerIsBetter,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
