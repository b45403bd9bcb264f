// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared types for Benchgate.
//!
//! This crate holds the plain data that every other Benchgate crate
//! exchanges: the commit descriptor a benchmark run belongs to, the closed
//! set of supported benchmark tools, alert thresholds and the workflow
//! reference used when rendering reports.
//!
//! # Modules
//!
//! - [`commit`] - Commit descriptors supplied by the hosting platform
//! - [`tool`] - Supported benchmark tools and their direction policy
//! - [`thresholds`] - Validated alert/fail thresholds
//! - [`workflow`] - Repository and workflow reference for report footers

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod commit;
pub mod thresholds;
pub mod tool;
pub mod workflow;

pub use commit::{Commit, GitUser};
pub use thresholds::{ThresholdError, Thresholds};
pub use tool::{Direction, Tool, UnknownTool};
pub use workflow::WorkflowRef;
