//! Markdown report generation for comparison results.
//!
//! Two reports are produced from a [`Comparison`]:
//!
//! - the alert report ([`format_alert`]), rendered only when at least one
//!   benchmark regressed beyond the alert threshold, and
//! - the summary report ([`render_summary`]), rendered unconditionally for
//!   jobs that comment on every run.
//!
//! Both are pure functions of their inputs.

use crate::compare::{ComparedEntry, Comparison};
use crate::number::{display, fixed};
use crate::result::BenchmarkResult;
use benchgate_core::{Thresholds, WorkflowRef};
use tracing::debug;

/// Benchmark name that is treated as "no name given".
pub const DEFAULT_NAME: &str = "Benchmark";

/// Presentation inputs shared by all reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Display name of the benchmark suite.
    pub name: &'a str,
    /// Handles to mention, each starting with `@`.
    pub cc_users: &'a [String],
    /// Workflow the footer links to.
    pub workflow: &'a WorkflowRef,
}

/// Alert decision for one matched benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryVerdict {
    /// Benchmark name.
    pub name: String,
    /// Regression ratio.
    pub ratio: f64,
    /// Ratio is strictly above the alert threshold.
    pub exceeds_alert: bool,
    /// Ratio is strictly above the failure threshold.
    pub exceeds_fail: bool,
}

/// Rendered alert report and the decisions behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertReport {
    body: String,
    verdicts: Vec<EntryVerdict>,
    thresholds: Thresholds,
}

impl AlertReport {
    /// Markdown body, suitable for a commit comment.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Per-entry decisions in current-run order.
    pub fn verdicts(&self) -> &[EntryVerdict] {
        &self.verdicts
    }

    /// Number of entries above the alert threshold.
    pub fn alert_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.exceeds_alert).count()
    }

    /// Number of entries above the failure threshold.
    pub fn failure_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.exceeds_fail).count()
    }

    /// Whether any entry exceeded the failure threshold.
    pub fn exceeded_fail(&self) -> bool {
        self.failure_count() > 0
    }

    /// Message reported when the run fails.
    ///
    /// When alerting and failing use different thresholds, the body is
    /// prefixed with how many alerts crossed the failure threshold.
    pub fn failure_message(&self) -> String {
        if !self.exceeded_fail() || self.thresholds.fail() == self.thresholds.alert() {
            return self.body.clone();
        }
        format!(
            "{} of {} alerts exceeded the failure threshold `{}` specified by fail-threshold input:\n\n{}",
            self.failure_count(),
            self.alert_count(),
            fixed(self.thresholds.fail()),
            self.body
        )
    }
}

/// Build the alert report, or `None` when no benchmark exceeds the alert
/// threshold.
///
/// The table lists every matched benchmark, not only the regressed ones.
pub fn format_alert(comparison: &Comparison<'_>, thresholds: Thresholds, ctx: ReportContext<'_>) -> Option<AlertReport> {
    let verdicts: Vec<EntryVerdict> = comparison
        .entries
        .iter()
        .map(|entry| EntryVerdict {
            name: entry.name().to_string(),
            ratio: entry.ratio,
            exceeds_alert: entry.ratio > thresholds.alert(),
            exceeds_fail: entry.ratio > thresholds.fail(),
        })
        .collect();

    let alerts = verdicts.iter().filter(|v| v.exceeds_alert).count();
    if alerts == 0 {
        debug!("No performance alert found");
        return None;
    }
    debug!(alerts, "Found performance alerts");

    let title = if thresholds.always_report() {
        "# Performance Report"
    } else {
        "# **Performance Alert**"
    };
    let suite = if ctx.name.is_empty() || ctx.name == DEFAULT_NAME {
        String::new()
    } else {
        format!(" **'{}'**", ctx.name)
    };

    let mut lines = vec![
        title.to_string(),
        String::new(),
        format!("Possible performance regression was detected for benchmark{suite}."),
        format!(
            "Benchmark result of this commit is worse than the previous benchmark result exceeding threshold `{}`.",
            fixed(thresholds.alert())
        ),
        String::new(),
    ];
    lines.extend(table_header(comparison));
    lines.extend(comparison.entries.iter().map(matched_row));
    lines.push(String::new());
    lines.push(footer(ctx.workflow));
    if !ctx.cc_users.is_empty() {
        lines.push(String::new());
        lines.push(format!("CC: {}", ctx.cc_users.join(", ")));
    }

    Some(AlertReport {
        body: lines.join("\n"),
        verdicts,
        thresholds,
    })
}

/// Render the full comparison table, regardless of thresholds.
///
/// Current benchmarks without a baseline counterpart are listed with empty
/// baseline and ratio cells.
pub fn render_summary(comparison: &Comparison<'_>, ctx: ReportContext<'_>) -> String {
    let mut lines = vec![
        format!("# {}", ctx.name),
        String::new(),
        "<details>".to_string(),
        String::new(),
    ];
    lines.extend(table_header(comparison));

    let mut matched = comparison.entries.iter().peekable();
    for bench in &comparison.current.benches {
        match matched.next_if(|entry| std::ptr::eq(entry.current, bench)) {
            Some(entry) => lines.push(matched_row(entry)),
            None => lines.push(format!("| `{}` | {} | | |", bench.name, value_cell(bench))),
        }
    }

    lines.push(String::new());
    lines.push("</details>".to_string());
    lines.push(String::new());
    lines.push(footer(ctx.workflow));
    lines.join("\n")
}

fn table_header(comparison: &Comparison<'_>) -> [String; 2] {
    [
        format!(
            "| Benchmark suite | Current: {} | Previous: {} | Ratio |",
            comparison.current.commit.id, comparison.baseline.commit.id
        ),
        "|-|-|-|-|".to_string(),
    ]
}

fn matched_row(entry: &ComparedEntry<'_>) -> String {
    format!(
        "| `{}` | {} | {} | `{}` |",
        entry.name(),
        value_cell(entry.current),
        value_cell(entry.baseline),
        fixed(entry.ratio)
    )
}

fn value_cell(bench: &BenchmarkResult) -> String {
    let mut cell = format!("`{}` {}", display(bench.value), bench.unit);
    if let Some(range) = &bench.range {
        cell.push_str(&format!(" (`{range}`)"));
    }
    cell
}

fn footer(workflow: &WorkflowRef) -> String {
    format!(
        "This comment was automatically generated by [workflow]({}/actions?query=workflow%3A{}).",
        workflow.repository_url,
        urlencoding::encode(&workflow.workflow)
    )
}
