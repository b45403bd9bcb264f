//! Benchmark extraction and regression detection for Benchgate.
//!
//! This crate turns raw output of benchmark tools into normalized
//! [`Benchmark`] records and compares two records to decide whether a
//! change regressed performance.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchgate_benchmarks::{compare_and_alert, extract, ReportContext};
//! use benchgate_core::{Commit, GitUser, Thresholds, WorkflowRef};
//!
//! # fn commit(id: &str) -> Commit {
//! #     Commit {
//! #         id: id.to_string(),
//! #         message: String::new(),
//! #         timestamp: String::new(),
//! #         url: String::new(),
//! #         author: GitUser::from_login("user"),
//! #         committer: GitUser::from_login("user"),
//! #     }
//! # }
//! let current = extract("pr/output.txt", "cargo", commit("head"))?;
//! let baseline = extract("base/output.txt", "cargo", commit("base"))?;
//!
//! let workflow = WorkflowRef::new("https://github.com/user/repo", "Benchmarks");
//! let ctx = ReportContext { name: "My suite", cc_users: &[], workflow: &workflow };
//! let outcome = compare_and_alert(&current, &baseline, Thresholds::uniform(2.0)?, ctx);
//! if let Some(message) = outcome.message() {
//!     eprintln!("{message}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - The normalized `Benchmark` and `BenchmarkResult` records
//! - [`parsers`] - One output parser per supported tool
//! - [`extract`] - The extraction dispatcher
//! - [`compare`] - Name-keyed, direction-aware comparison of two runs
//! - [`markdown`] - Alert and summary report rendering
//! - [`io`] - Payload reading and record (de)serialization

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod compare;
pub mod error;
pub mod extract;
pub mod io;
pub mod markdown;
pub mod number;
pub mod parsers;
pub mod result;

pub use compare::{compare, ComparedEntry, Comparison};
pub use error::{ExtractError, ParseError};
pub use extract::{extract, extract_str};
pub use markdown::{format_alert, render_summary, AlertReport, EntryVerdict, ReportContext};
pub use result::{Benchmark, BenchmarkResult};

use benchgate_core::Thresholds;

/// Verdict of comparing a current run against its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertOutcome {
    /// Alert report, present when at least one benchmark exceeded the
    /// alert threshold.
    pub report: Option<AlertReport>,
    /// Whether at least one benchmark exceeded the failure threshold.
    pub should_fail: bool,
}

impl AlertOutcome {
    /// Text to show the user: the failure message when failing, the alert
    /// body when only alerting, nothing on a clean pass.
    pub fn message(&self) -> Option<String> {
        self.report.as_ref().map(|report| {
            if self.should_fail {
                report.failure_message()
            } else {
                report.body().to_string()
            }
        })
    }
}

/// Compare `current` with `baseline` and render the alert report.
///
/// A clean comparison is the normal path and yields an outcome without a
/// report; it is never an error.
pub fn compare_and_alert(
    current: &Benchmark,
    baseline: &Benchmark,
    thresholds: Thresholds,
    ctx: ReportContext<'_>,
) -> AlertOutcome {
    let comparison = compare(current, baseline);
    let report = format_alert(&comparison, thresholds, ctx);
    let should_fail = report.as_ref().is_some_and(AlertReport::exceeded_fail);
    AlertOutcome { report, should_fail }
}
