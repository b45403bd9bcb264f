// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Alert and failure thresholds.

use thiserror::Error;

/// Errors raised when building [`Thresholds`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// A threshold is negative, NaN or infinite.
    #[error("'{name}' must be a finite, non-negative ratio but got {value}")]
    OutOfRange {
        /// Which threshold was rejected.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The failure threshold is below the alert threshold.
    #[error("'alert-threshold' value must be smaller than 'fail-threshold' value but got {alert} > {fail}")]
    Inverted {
        /// Alert threshold.
        alert: f64,
        /// Failure threshold.
        fail: f64,
    },
}

/// Ratio thresholds above which a regression is reported or fails the run.
///
/// A value of `2.0` means "twice as bad as the baseline". Comparisons are
/// strict: a ratio equal to a threshold does not exceed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    alert: f64,
    fail: f64,
}

impl Thresholds {
    /// Validate and build thresholds. `fail` must be at least `alert`.
    pub fn new(alert: f64, fail: f64) -> Result<Self, ThresholdError> {
        check_range("alert-threshold", alert)?;
        check_range("fail-threshold", fail)?;
        if fail < alert {
            return Err(ThresholdError::Inverted { alert, fail });
        }
        Ok(Self { alert, fail })
    }

    /// Thresholds where alerting and failing happen at the same ratio.
    pub fn uniform(threshold: f64) -> Result<Self, ThresholdError> {
        Self::new(threshold, threshold)
    }

    /// Ratio above which a regression is reported.
    pub fn alert(&self) -> f64 {
        self.alert
    }

    /// Ratio above which the run fails.
    pub fn fail(&self) -> f64 {
        self.fail
    }

    /// Zero alert threshold: every matched benchmark is reported.
    pub fn always_report(&self) -> bool {
        self.alert == 0.0
    }
}

fn check_range(name: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ThresholdError::OutOfRange { name, value })
    }
}
