// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comment publishing.
//!
//! Reports are attached to a commit by handing them to a [`CommentSink`].
//! The sinks shipped here keep the report local; a platform API client is
//! one more implementation of the same trait.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while publishing a comment.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The commit id cannot be used as a comment target.
    #[error("Invalid commit id for comment: '{0}'")]
    InvalidCommitId(String),

    /// Writing the comment failed.
    #[error("Cannot write comment to {target}: {source}")]
    Io {
        /// Where the comment was being written.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The destination refused the comment.
    #[error("Comment was rejected: {0}")]
    Rejected(String),
}

/// Result type for publishing.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Acknowledgement of a published comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Commit the comment was attached to.
    pub commit_id: String,
    /// Where the comment ended up (a URL, a path or a stream name).
    pub location: String,
}

/// Destination for commit comments.
pub trait CommentSink {
    /// Attach `body` to the commit `commit_id`.
    fn publish(&self, commit_id: &str, body: &str) -> Result<PublishReceipt>;
}

/// Prints comments to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl CommentSink for StdoutSink {
    fn publish(&self, commit_id: &str, body: &str) -> Result<PublishReceipt> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{body}").map_err(|source| PublishError::Io {
            target: "stdout".to_string(),
            source,
        })?;
        info!(commit = commit_id, "Comment was written to stdout");
        Ok(PublishReceipt {
            commit_id: commit_id.to_string(),
            location: "stdout".to_string(),
        })
    }
}

/// Writes each comment to `<dir>/<commit_id>.md`.
///
/// A later comment for the same commit replaces the earlier one.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing below `dir`; the directory is created on first
    /// use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, commit_id: &str) -> Result<PathBuf> {
        let valid = !commit_id.is_empty()
            && commit_id != "."
            && commit_id != ".."
            && !commit_id.contains(['/', '\\']);
        if !valid {
            return Err(PublishError::InvalidCommitId(commit_id.to_string()));
        }
        Ok(self.dir.join(format!("{commit_id}.md")))
    }
}

impl CommentSink for DirectorySink {
    fn publish(&self, commit_id: &str, body: &str) -> Result<PublishReceipt> {
        let path = self.path_for(commit_id)?;
        let io_err = |source| PublishError::Io {
            target: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(&path, body).map_err(io_err)?;

        info!(commit = commit_id, path = %path.display(), "Comment was written");
        Ok(PublishReceipt {
            commit_id: commit_id.to_string(),
            location: path.display().to_string(),
        })
    }
}
