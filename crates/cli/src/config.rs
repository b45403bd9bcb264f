//! Validated run configuration.
//!
//! [`Config::from_cli`] turns raw command-line and environment inputs into
//! typed values, rejecting anything a run could not use.

use crate::Cli;
use benchgate_core::{ThresholdError, Thresholds, Tool};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The benchmark name is empty.
    #[error("Name must not be empty")]
    EmptyName,

    /// The tool is not one of the supported tools.
    #[error("Invalid value '{tool}' for 'tool' input. It must be one of {valid}")]
    InvalidTool {
        /// Value given.
        tool: String,
        /// Comma-separated list of supported tools.
        valid: String,
    },

    /// A benchmark output path is unusable.
    #[error("Invalid value for '{input}' input: {reason}")]
    InvalidPath {
        /// Input the path came from.
        input: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A required percentage input is empty.
    #[error("'{0}' input must not be empty")]
    MissingPercentage(&'static str),

    /// A percentage input lacks its `%` suffix.
    #[error("'{0}' input must ends with '%' for percentage value (e.g. '200%')")]
    PercentageSuffix(&'static str),

    /// A percentage input is not a number.
    #[error("Specified value '{value}' in '{input}' input cannot be parsed as float number")]
    PercentageNumber {
        /// Input the value came from.
        input: &'static str,
        /// Value without its `%` suffix.
        value: String,
    },

    /// A CC handle does not start with `@`.
    #[error("User name in 'alert-comment-cc-users' input must start with '@' but got '{0}'")]
    CcUser(String),

    /// The thresholds are inconsistent.
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

/// Validated configuration for one comparison run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Benchmark suite name.
    pub name: String,
    /// Tool that produced both outputs.
    pub tool: Tool,
    /// Output of the pull request run.
    pub pr_benchmark_file: PathBuf,
    /// Output of the base branch run.
    pub base_benchmark_file: PathBuf,
    /// Publish the full summary on every run.
    pub comment_always: bool,
    /// Publish the alert report when an alert is raised.
    pub comment_on_alert: bool,
    /// Alert and failure thresholds.
    pub thresholds: Thresholds,
    /// Fail the run when the failure threshold is exceeded.
    pub fail_on_alert: bool,
    /// Handles mentioned in alert reports.
    pub alert_comment_cc_users: Vec<String>,
    /// GitHub event payload file.
    pub event_path: PathBuf,
    /// Workflow name shown in report footers.
    pub workflow: String,
    /// Directory comments are written to; stdout when unset.
    pub comment_dir: Option<PathBuf>,
    /// Where to write the pull request run as JSON.
    pub output_json: Option<PathBuf>,
}

impl Config {
    /// Validate raw inputs.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let tool = cli.tool.parse::<Tool>().map_err(|_| ConfigError::InvalidTool {
            tool: cli.tool.clone(),
            valid: Tool::ALL.iter().map(Tool::as_str).collect::<Vec<_>>().join(", "),
        })?;

        let pr_benchmark_file = resolve_file_path("pr-benchmark-file-path", &cli.pr_benchmark_file_path)?;
        let base_benchmark_file = resolve_file_path("base-benchmark-file-path", &cli.base_benchmark_file_path)?;

        let alert = parse_percentage("alert-threshold", &cli.alert_threshold)?
            .ok_or(ConfigError::MissingPercentage("alert-threshold"))?;
        // An empty or zero failure threshold falls back to the alert threshold.
        let fail = match cli.fail_threshold.as_deref() {
            Some(raw) => parse_percentage("fail-threshold", raw)?.filter(|v| *v != 0.0).unwrap_or(alert),
            None => alert,
        };
        let thresholds = Thresholds::new(alert, fail)?;

        let alert_comment_cc_users = parse_cc_users(&cli.alert_comment_cc_users)?;

        Ok(Self {
            name: cli.name.clone(),
            tool,
            pr_benchmark_file,
            base_benchmark_file,
            comment_always: cli.comment_always,
            comment_on_alert: cli.comment_on_alert,
            thresholds,
            fail_on_alert: cli.fail_on_alert,
            alert_comment_cc_users,
            event_path: cli.event_path.clone(),
            workflow: cli.workflow.clone(),
            comment_dir: cli.comment_dir.clone(),
            output_json: cli.output_json.clone(),
        })
    }
}

/// Parse `"200%"` into `2.0`. An empty input yields `None`.
pub fn parse_percentage(input: &'static str, raw: &str) -> Result<Option<f64>, ConfigError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let number = raw.strip_suffix('%').ok_or(ConfigError::PercentageSuffix(input))?;
    let percentage = number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::PercentageNumber {
            input,
            value: number.to_string(),
        })?;
    Ok(Some(percentage / 100.0))
}

/// Split a comma-separated handle list; every handle must start with `@`.
pub fn parse_cc_users(raw: &str) -> Result<Vec<String>, ConfigError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(str::trim)
        .map(|user| {
            if user.starts_with('@') {
                Ok(user.to_string())
            } else {
                Err(ConfigError::CcUser(user.to_string()))
            }
        })
        .collect()
}

fn resolve_file_path(input: &'static str, raw: &Path) -> Result<PathBuf, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidPath { input, reason };

    let path = expand_home(raw).ok_or_else(|| invalid(format!("Cannot resolve '~' in {}", raw.display())))?;
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|e| invalid(format!("Cannot resolve '{}': {e}", raw.display())))?
            .join(path)
    };

    let meta = std::fs::metadata(&path).map_err(|e| invalid(format!("Cannot stat '{}': {e}", path.display())))?;
    if !meta.is_file() {
        return Err(invalid(format!("Specified path '{}' is not a file", path.display())));
    }
    Ok(path)
}

fn expand_home(path: &Path) -> Option<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Some(path.to_path_buf());
    };
    let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
    Some(PathBuf::from(home).join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        file: String,
        dir: String,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, "test a ... bench: 1 ns/iter (+/- 0)\n").unwrap();
        Fixture {
            file: file.display().to_string(),
            dir: dir.path().display().to_string(),
            _dir: dir,
        }
    }

    fn cli(fx: &Fixture, extra: &[&str]) -> Cli {
        let mut args = vec![
            "benchgate",
            "--name",
            "Benchmark",
            "--tool",
            "cargo",
            "--pr-benchmark-file-path",
            fx.file.as_str(),
            "--base-benchmark-file-path",
            fx.file.as_str(),
            "--alert-threshold",
            "200%",
            "--alert-comment-cc-users",
            "",
            "--event-path",
            "event.json",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    fn error(fx: &Fixture, extra: &[&str]) -> String {
        Config::from_cli(&cli(fx, extra)).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_config() {
        let fx = fixture();
        let config = Config::from_cli(&cli(&fx, &["--alert-comment-cc-users", "@foo, @bar", "--fail-on-alert"])).unwrap();

        assert_eq!(config.name, "Benchmark");
        assert_eq!(config.tool, Tool::Cargo);
        assert_eq!(config.pr_benchmark_file, PathBuf::from(&fx.file));
        assert_eq!(config.thresholds.alert(), 2.0);
        assert_eq!(config.thresholds.fail(), 2.0);
        assert_eq!(config.alert_comment_cc_users, vec!["@foo", "@bar"]);
        assert!(config.fail_on_alert);
        assert!(!config.comment_on_alert);
    }

    #[test]
    fn test_fail_threshold_is_separate_when_given() {
        let fx = fixture();
        let config = Config::from_cli(&cli(&fx, &["--fail-threshold", "300%"])).unwrap();
        assert_eq!(config.thresholds.fail(), 3.0);

        let config = Config::from_cli(&cli(&fx, &["--fail-threshold", ""])).unwrap();
        assert_eq!(config.thresholds.fail(), 2.0);
    }

    #[test]
    fn test_rejects_empty_name() {
        let fx = fixture();
        assert_eq!(error(&fx, &["--name", ""]), "Name must not be empty");
    }

    #[test]
    fn test_rejects_unknown_tool() {
        let fx = fixture();
        assert!(error(&fx, &["--tool", "foo"]).starts_with("Invalid value 'foo' for 'tool' input"));
    }

    #[test]
    fn test_rejects_missing_file() {
        let fx = fixture();
        let missing = format!("{}/foo.txt", fx.dir);
        let msg = error(&fx, &["--pr-benchmark-file-path", missing.as_str()]);
        assert!(msg.starts_with("Invalid value for 'pr-benchmark-file-path' input: Cannot stat"), "{msg}");
    }

    #[test]
    fn test_rejects_directory() {
        let fx = fixture();
        let msg = error(&fx, &["--base-benchmark-file-path", fx.dir.as_str()]);
        assert!(msg.starts_with("Invalid value for 'base-benchmark-file-path' input"), "{msg}");
        assert!(msg.ends_with("is not a file"), "{msg}");
    }

    #[test]
    fn test_rejects_bad_percentages() {
        let fx = fixture();
        assert_eq!(
            error(&fx, &["--alert-threshold", "1.2"]),
            "'alert-threshold' input must ends with '%' for percentage value (e.g. '200%')"
        );
        assert_eq!(
            error(&fx, &["--alert-threshold", "foo%"]),
            "Specified value 'foo' in 'alert-threshold' input cannot be parsed as float number"
        );
        assert_eq!(error(&fx, &["--alert-threshold", ""]), "'alert-threshold' input must not be empty");
        assert_eq!(
            error(&fx, &["--fail-threshold", "1.2"]),
            "'fail-threshold' input must ends with '%' for percentage value (e.g. '200%')"
        );
        assert_eq!(
            error(&fx, &["--fail-threshold", "foo%"]),
            "Specified value 'foo' in 'fail-threshold' input cannot be parsed as float number"
        );
    }

    #[test]
    fn test_rejects_fail_below_alert() {
        let fx = fixture();
        assert_eq!(
            error(&fx, &["--alert-threshold", "150%", "--fail-threshold", "120%"]),
            "'alert-threshold' value must be smaller than 'fail-threshold' value but got 1.5 > 1.2"
        );
    }

    #[test]
    fn test_rejects_cc_user_without_at() {
        let fx = fixture();
        assert_eq!(
            error(&fx, &["--alert-comment-cc-users", "@foo,bar"]),
            "User name in 'alert-comment-cc-users' input must start with '@' but got 'bar'"
        );
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("alert-threshold", "200%").unwrap(), Some(2.0));
        assert_eq!(parse_percentage("alert-threshold", "0%").unwrap(), Some(0.0));
        assert_eq!(parse_percentage("alert-threshold", "").unwrap(), None);
        assert!(parse_percentage("alert-threshold", "inf%").is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/out.txt")), Some(PathBuf::from("/abs/out.txt")));
        if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
            assert_eq!(expand_home(Path::new("~/out.txt")), Some(PathBuf::from(home).join("out.txt")));
        }
    }
}
