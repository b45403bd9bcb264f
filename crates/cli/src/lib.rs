//! CLI for Benchgate.
//!
//! Compares the benchmark output of a pull request with the output of its
//! base branch, reports regressions and decides whether the job fails.
//! Every flag can also be given through a `BENCHGATE_*` environment
//! variable; the GitHub event path and workflow name default to the
//! variables GitHub Actions sets.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;

use anyhow::{bail, Context};
use benchgate_adapters::{CommentSink, DirectorySink, EventPayload, PublishReceipt, StdoutSink};
use benchgate_benchmarks::{compare, compare_and_alert, extract, io, render_summary, ReportContext};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub use config::{Config, ConfigError};

/// Benchgate CLI.
#[derive(Parser, Debug, Clone)]
#[command(name = "benchgate")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Name of the benchmark suite shown in reports.
    #[arg(long, env = "BENCHGATE_NAME", default_value = "Benchmark")]
    pub name: String,

    /// Tool that produced the outputs: cargo, go, benchmarkjs, pytest,
    /// googlecpp or catch2.
    #[arg(long, env = "BENCHGATE_TOOL")]
    pub tool: String,

    /// Benchmark output of the pull request.
    #[arg(long, env = "BENCHGATE_PR_BENCHMARK_FILE_PATH")]
    pub pr_benchmark_file_path: PathBuf,

    /// Benchmark output of the base branch.
    #[arg(long, env = "BENCHGATE_BASE_BENCHMARK_FILE_PATH")]
    pub base_benchmark_file_path: PathBuf,

    /// Publish the full comparison on every run.
    #[arg(long, env = "BENCHGATE_COMMENT_ALWAYS")]
    pub comment_always: bool,

    /// Publish the alert report when an alert is raised.
    #[arg(long, env = "BENCHGATE_COMMENT_ON_ALERT")]
    pub comment_on_alert: bool,

    /// Ratio, as a percentage, above which an alert is raised.
    #[arg(long, env = "BENCHGATE_ALERT_THRESHOLD", default_value = "200%")]
    pub alert_threshold: String,

    /// Ratio, as a percentage, above which the run fails. Defaults to the
    /// alert threshold.
    #[arg(long, env = "BENCHGATE_FAIL_THRESHOLD")]
    pub fail_threshold: Option<String>,

    /// Exit with a failure when the failure threshold is exceeded.
    #[arg(long, env = "BENCHGATE_FAIL_ON_ALERT")]
    pub fail_on_alert: bool,

    /// Comma-separated handles to mention in alert reports, e.g. `@a,@b`.
    #[arg(long, env = "BENCHGATE_ALERT_COMMENT_CC_USERS", default_value = "")]
    pub alert_comment_cc_users: String,

    /// GitHub event payload file.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Workflow name linked from report footers.
    #[arg(long, env = "GITHUB_WORKFLOW", default_value = "Benchmark")]
    pub workflow: String,

    /// Write comments to `<dir>/<commit>.md` instead of stdout.
    #[arg(long, env = "BENCHGATE_COMMENT_DIR")]
    pub comment_dir: Option<PathBuf>,

    /// Write the extracted pull request run to this JSON file.
    #[arg(long, env = "BENCHGATE_OUTPUT_JSON")]
    pub output_json: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "BENCHGATE_LOG_JSON")]
    pub log_json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No benchmark exceeded the alert threshold.
    Pass,
    /// An alert was raised without failing the run.
    Alert,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final verdict.
    pub verdict: Verdict,
    /// Comments that were published.
    pub comments: Vec<PublishReceipt>,
}

/// Initialise logging. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("Logging was not initialised: {e}");
    }
}

/// Run the CLI with process arguments.
///
/// # Returns
///
/// Returns `Ok(())` when the run passed or only alerted, or an error whose
/// message is the regression report or the cause of the failure.
pub fn run() -> anyhow::Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let config = Config::from_cli(&cli)?;
    debug!(?config, "Configuration validated");

    let report = match &config.comment_dir {
        Some(dir) => {
            let sink = DirectorySink::new(dir);
            info!(dir = %sink.dir().display(), "Comments will be written to a directory");
            execute(&config, &sink)
        }
        None => execute(&config, &StdoutSink),
    }?;
    info!(verdict = ?report.verdict, comments = report.comments.len(), "Benchmark comparison finished");
    Ok(())
}

/// Compare the two runs described by `config` and publish through `sink`.
///
/// A regression that fails the run takes precedence over a publishing
/// error; a publishing error alone still fails the run.
pub fn execute(config: &Config, sink: &dyn CommentSink) -> anyhow::Result<RunReport> {
    let event = EventPayload::from_file(&config.event_path)?;
    let head = event.head_commit()?;
    let base = event.base_commit()?;
    let workflow = event.workflow_ref(config.workflow.as_str())?;

    let current = extract(&config.pr_benchmark_file, config.tool.as_str(), head)?;
    debug!(benches = current.benches.len(), "Extracted pull request benchmark");
    let baseline = extract(&config.base_benchmark_file, config.tool.as_str(), base)?;
    debug!(benches = baseline.benches.len(), "Extracted base benchmark");

    if let Some(path) = &config.output_json {
        io::write_benchmark_json(&current, path)
            .with_context(|| format!("Cannot write benchmark JSON to '{}'", path.display()))?;
        info!(path = %path.display(), "Wrote pull request benchmark");
    }

    let ctx = ReportContext {
        name: &config.name,
        cc_users: &config.alert_comment_cc_users,
        workflow: &workflow,
    };
    info!("Comparing PR benchmark to base branch");

    let mut comments = Vec::new();
    let mut publish_error = None;
    let mut publish = |body: &str| match sink.publish(&current.commit.id, body) {
        Ok(receipt) => {
            info!(location = %receipt.location, "Comment was published");
            comments.push(receipt);
        }
        Err(e) => {
            error!(error = %e, "Failed to publish comment");
            publish_error.get_or_insert(e);
        }
    };

    if config.comment_always {
        publish(&render_summary(&compare(&current, &baseline), ctx));
    }

    let outcome = compare_and_alert(&current, &baseline, config.thresholds, ctx);
    if let Some(report) = &outcome.report {
        warn!(
            alerts = report.alert_count(),
            failures = report.failure_count(),
            "Performance alert\n{}",
            report.body()
        );
        if config.comment_on_alert {
            publish(report.body());
        }
    }

    if outcome.should_fail && config.fail_on_alert {
        if let Some(message) = outcome.message() {
            bail!(message);
        }
    }
    if let Some(e) = publish_error {
        return Err(e).context("Comment could not be published");
    }

    let verdict = if outcome.report.is_some() {
        Verdict::Alert
    } else {
        Verdict::Pass
    };
    Ok(RunReport { verdict, comments })
}
