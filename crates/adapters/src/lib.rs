// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Platform adapters for Benchgate.
//!
//! Benchgate's core logic never talks to a CI platform directly. This crate
//! sits at that boundary:
//!
//! - [`github`] - Reads a GitHub `pull_request` event payload and derives the
//!   commit descriptors and workflow reference for both runs
//! - [`publish`] - The [`CommentSink`] trait reports are handed to, with
//!   stdout and directory implementations
//!
//! # Example
//!
//! ```no_run
//! use benchgate_adapters::{CommentSink, EventPayload, StdoutSink};
//!
//! let event = EventPayload::from_file("/github/workflow/event.json")?;
//! let head = event.head_commit()?;
//! let receipt = StdoutSink.publish(&head.id, "report body")?;
//! println!("{}", receipt.location);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod github;
pub mod publish;

pub use github::{EventError, EventPayload};
pub use publish::{CommentSink, DirectorySink, PublishError, PublishReceipt, StdoutSink};
