//! Alert report tests comparing a pull request run against its base.

use benchgate_benchmarks::{compare, compare_and_alert, render_summary, Benchmark, BenchmarkResult, ReportContext};
use benchgate_core::{Commit, GitUser, Thresholds, Tool, WorkflowRef};

const FOOTER: &str = "This comment was automatically generated by \
[workflow](https://github.com/user/repo/actions?query=workflow%3AWorkflow%20name).";

fn commit(id: &str) -> Commit {
    let user = GitUser {
        name: "User".to_string(),
        username: "user".to_string(),
        email: Some("dummy@example.com".to_string()),
    };
    Commit {
        id: id.to_string(),
        message: "dummy message".to_string(),
        timestamp: "dummy stamp".to_string(),
        url: format!("https://github.com/user/repo/commit/{id}"),
        author: user.clone(),
        committer: user,
    }
}

fn bench(name: &str, value: f64) -> BenchmarkResult {
    BenchmarkResult::new(name, value, "ns/iter").with_range("± 20")
}

fn ops_bench(name: &str, value: f64) -> BenchmarkResult {
    BenchmarkResult::new(name, value, "ops/sec").with_range("+-20")
}

fn runs(tool: Tool, base: Vec<BenchmarkResult>, pr: Vec<BenchmarkResult>) -> (Benchmark, Benchmark) {
    let base = Benchmark {
        commit: commit("prev commit id"),
        date: 1_000,
        tool,
        benches: base,
    };
    let pr = Benchmark {
        commit: commit("current commit id"),
        date: 2_000,
        tool,
        benches: pr,
    };
    (pr, base)
}

fn workflow() -> WorkflowRef {
    WorkflowRef::new("https://github.com/user/repo", "Workflow name")
}

fn cc_user() -> Vec<String> {
    vec!["@user".to_string()]
}

const HEADER: &str = "| Benchmark suite | Current: current commit id | Previous: prev commit id | Ratio |\n|-|-|-|-|";

#[test]
fn test_raises_alert_when_exceeding_threshold() {
    let (pr, base) = runs(
        Tool::Go,
        vec![bench("bench_fib_10", 100.0), bench("bench_fib_20", 10000.0)],
        vec![bench("bench_fib_10", 210.0), bench("bench_fib_20", 25000.0)],
    );
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);

    let expected = [
        "# **Performance Alert**",
        "",
        "Possible performance regression was detected for benchmark **'Test benchmark'**.",
        "Benchmark result of this commit is worse than the previous benchmark result exceeding threshold `2`.",
        "",
        HEADER,
        "| `bench_fib_10` | `210` ns/iter (`± 20`) | `100` ns/iter (`± 20`) | `2.10` |",
        "| `bench_fib_20` | `25000` ns/iter (`± 20`) | `10000` ns/iter (`± 20`) | `2.50` |",
        "",
        FOOTER,
        "",
        "CC: @user",
    ]
    .join("\n");
    assert!(outcome.should_fail);
    assert_eq!(outcome.message().as_deref(), Some(expected.as_str()));
    let report = outcome.report.unwrap();
    assert_eq!(report.body(), expected);
    assert_eq!(report.alert_count(), 2);
    assert_eq!(report.failure_count(), 2);
}

#[test]
fn test_bigger_is_better_tool() {
    let (pr, base) = runs(
        Tool::Benchmarkjs,
        vec![ops_bench("benchFib10", 100.0)],
        vec![ops_bench("benchFib10", 20.0)],
    );
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);

    let body = outcome.report.unwrap().body().to_string();
    assert!(body.contains("| `benchFib10` | `20` ops/sec (`+-20`) | `100` ops/sec (`+-20`) | `5` |"), "{body}");
}

#[test]
fn test_default_name_is_not_shown() {
    let (pr, base) = runs(Tool::Cargo, vec![bench("bench_fib_10", 100.0)], vec![bench("bench_fib_10", 210.0)]);
    let (wf, cc) = (workflow(), cc_user());
    for name in ["Benchmark", ""] {
        let ctx = ReportContext { name, cc_users: &cc, workflow: &wf };
        let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
        let lines: Vec<String> = outcome.report.unwrap().body().lines().map(str::to_string).collect();
        assert_eq!(lines[2], "Possible performance regression was detected for benchmark.");
    }
}

#[test]
fn test_cc_line_omitted_without_users() {
    let (pr, base) = runs(Tool::Googlecpp, vec![bench("bench_fib_10", 100.0)], vec![bench("bench_fib_10", 210.0)]);
    let wf = workflow();
    let ctx = ReportContext { name: "Test benchmark", cc_users: &[], workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
    let body = outcome.report.unwrap().body().to_string();
    assert!(body.ends_with(FOOTER), "{body}");
    assert!(!body.contains("CC:"));
}

#[test]
fn test_cc_users_keep_input_order() {
    let (pr, base) = runs(Tool::Cargo, vec![bench("bench_fib_10", 100.0)], vec![bench("bench_fib_10", 210.0)]);
    let wf = workflow();
    let cc = vec!["@b".to_string(), "@a".to_string()];
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
    assert!(outcome.report.unwrap().body().ends_with("\n\nCC: @b, @a"));
}

#[test]
fn test_other_benchmarks_are_ignored() {
    let (pr, base) = runs(Tool::Cargo, vec![bench("another_bench", 100.0)], vec![bench("bench_fib_10", 210.0)]);
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
    assert!(outcome.report.is_none());
    assert!(!outcome.should_fail);
    assert_eq!(outcome.message(), None);
}

#[test]
fn test_zero_threshold_always_reports() {
    let (pr, base) = runs(
        Tool::Benchmarkjs,
        vec![ops_bench("benchFib10", 100.0)],
        vec![ops_bench("benchFib10", 100.0)],
    );
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(0.0).unwrap(), ctx);

    let expected = [
        "# Performance Report",
        "",
        "Possible performance regression was detected for benchmark **'Test benchmark'**.",
        "Benchmark result of this commit is worse than the previous benchmark result exceeding threshold `0`.",
        "",
        HEADER,
        "| `benchFib10` | `100` ops/sec (`+-20`) | `100` ops/sec (`+-20`) | `1` |",
        "",
        FOOTER,
        "",
        "CC: @user",
    ]
    .join("\n");
    assert!(outcome.should_fail);
    assert_eq!(outcome.message().as_deref(), Some(expected.as_str()));
}

#[test]
fn test_failure_threshold_differs_from_alert_threshold() {
    let (pr, base) = runs(Tool::Go, vec![bench("bench_fib_10", 100.0)], vec![bench("bench_fib_10", 350.0)]);
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::new(2.0, 3.0).unwrap(), ctx);

    let expected = [
        "1 of 1 alerts exceeded the failure threshold `3` specified by fail-threshold input:",
        "",
        "# **Performance Alert**",
        "",
        "Possible performance regression was detected for benchmark **'Test benchmark'**.",
        "Benchmark result of this commit is worse than the previous benchmark result exceeding threshold `2`.",
        "",
        HEADER,
        "| `bench_fib_10` | `350` ns/iter (`± 20`) | `100` ns/iter (`± 20`) | `3.50` |",
        "",
        FOOTER,
        "",
        "CC: @user",
    ]
    .join("\n");
    assert!(outcome.should_fail);
    assert_eq!(outcome.message().as_deref(), Some(expected.as_str()));
}

#[test]
fn test_alert_below_failure_threshold_does_not_fail() {
    let (pr, base) = runs(Tool::Go, vec![bench("bench_fib_10", 100.0)], vec![bench("bench_fib_10", 210.0)]);
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::new(2.0, 3.0).unwrap(), ctx);

    assert!(!outcome.should_fail);
    let report = outcome.report.as_ref().unwrap();
    assert_eq!(report.alert_count(), 1);
    assert!(!report.exceeded_fail());
    assert_eq!(outcome.message().as_deref(), Some(report.body()));
}

#[test]
fn test_ratio_equal_to_threshold_does_not_alert() {
    let (pr, base) = runs(Tool::Cargo, vec![bench("x", 100.0)], vec![bench("x", 200.0)]);
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    assert!(compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx).report.is_none());

    let (pr, base) = runs(Tool::Cargo, vec![bench("x", 100.0)], vec![bench("x", 200.001)]);
    assert!(compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx).report.is_some());
}

#[test]
fn test_table_lists_all_matched_entries() {
    let (pr, base) = runs(
        Tool::Cargo,
        vec![bench("slow", 100.0), bench("fine", 100.0)],
        vec![bench("slow", 300.0), bench("fine", 100.0)],
    );
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
    let report = outcome.report.unwrap();
    assert!(report.body().contains("| `fine` | `100` ns/iter (`± 20`) | `100` ns/iter (`± 20`) | `1` |"));
    let verdicts: Vec<(&str, bool)> = report.verdicts().iter().map(|v| (v.name.as_str(), v.exceeds_fail)).collect();
    assert_eq!(verdicts, vec![("slow", true), ("fine", false)]);
}

#[test]
fn test_summary_lists_new_benchmarks() {
    let (pr, base) = runs(
        Tool::Cargo,
        vec![bench("bench_fib_10", 100.0)],
        vec![bench("bench_new", 50.0), bench("bench_fib_10", 150.0)],
    );
    let wf = workflow();
    let ctx = ReportContext { name: "My suite", cc_users: &[], workflow: &wf };
    let summary = render_summary(&compare(&pr, &base), ctx);

    let expected = [
        "# My suite",
        "",
        "<details>",
        "",
        HEADER,
        "| `bench_new` | `50` ns/iter (`± 20`) | | |",
        "| `bench_fib_10` | `150` ns/iter (`± 20`) | `100` ns/iter (`± 20`) | `1.50` |",
        "",
        "</details>",
        "",
        FOOTER,
    ]
    .join("\n");
    assert_eq!(summary, expected);
}

#[test]
fn test_zero_baseline_renders_infinite_ratio() {
    let (pr, base) = runs(Tool::Cargo, vec![bench("x", 0.0)], vec![bench("x", 5.0)]);
    let (wf, cc) = (workflow(), cc_user());
    let ctx = ReportContext { name: "Test benchmark", cc_users: &cc, workflow: &wf };
    let outcome = compare_and_alert(&pr, &base, Thresholds::uniform(2.0).unwrap(), ctx);
    let body = outcome.report.unwrap().body().to_string();
    assert!(body.contains("| `x` | `5` ns/iter (`± 20`) | `0` ns/iter (`± 20`) | `Infinity` |"), "{body}");
}
