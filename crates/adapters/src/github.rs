// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! GitHub event payload adapter.
//!
//! A `pull_request` event carries everything needed to describe both sides
//! of a comparison: the head commit of the pull request and the commit of
//! the branch it targets. GitHub writes the event to the file named by
//! `GITHUB_EVENT_PATH`.

use benchgate_core::{Commit, GitUser, WorkflowRef};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading an event payload.
#[derive(Debug, Error)]
pub enum EventError {
    /// The payload file could not be read.
    #[error("Cannot read event payload '{}': {source}", .path.display())]
    Io {
        /// Path of the payload file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a JSON document of the expected shape.
    #[error("Invalid event payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The event is not a pull request event.
    #[error("No commit information is found in payload")]
    MissingPullRequest,

    /// The event carries no repository object.
    #[error("Repository information is not available in payload")]
    MissingRepository,
}

/// Result type for event payload operations.
pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, Clone, Deserialize)]
struct PullRequest {
    title: String,
    html_url: String,
    head: BranchRef,
    base: BranchRef,
}

#[derive(Debug, Clone, Deserialize)]
struct BranchRef {
    sha: String,
    #[serde(default)]
    label: String,
    repo: RepoInfo,
    user: Account,
}

#[derive(Debug, Clone, Deserialize)]
struct RepoInfo {
    #[serde(default)]
    updated_at: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Account {
    login: String,
}

/// Parsed GitHub event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequest>,
    #[serde(default)]
    repository: Option<RepoInfo>,
}

impl EventPayload {
    /// Read and parse the payload file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| EventError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "Read event payload");
        Self::from_json(&raw)
    }

    /// Parse a payload held in memory.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Latest commit of the pull request branch.
    ///
    /// Pull request events have no `head_commit`, so the descriptor is
    /// assembled from the pull request itself: the title stands in for the
    /// commit message and the head repository's update time for the
    /// timestamp.
    pub fn head_commit(&self) -> Result<Commit> {
        let pr = self.pull_request.as_ref().ok_or(EventError::MissingPullRequest)?;
        let url = format!("{}/commits/{}", pr.html_url, pr.head.sha);
        Ok(branch_commit(&pr.head, pr.title.clone(), url))
    }

    /// Commit of the branch the pull request targets.
    pub fn base_commit(&self) -> Result<Commit> {
        let pr = self.pull_request.as_ref().ok_or(EventError::MissingPullRequest)?;
        let url = format!("{}/commits/{}", pr.base.repo.html_url, pr.base.sha);
        Ok(branch_commit(&pr.base, pr.base.label.clone(), url))
    }

    /// Repository and workflow reference for report footers.
    pub fn workflow_ref(&self, workflow: impl Into<String>) -> Result<WorkflowRef> {
        let repo = self.repository.as_ref().ok_or(EventError::MissingRepository)?;
        Ok(WorkflowRef::new(repo.html_url.clone(), workflow))
    }
}

// Only the login is known for either side; it doubles as the display name.
fn branch_commit(branch: &BranchRef, message: String, url: String) -> Commit {
    let user = GitUser::from_login(branch.user.login.clone());
    Commit {
        id: branch.sha.clone(),
        message,
        timestamp: branch.repo.updated_at.clone(),
        url,
        author: user.clone(),
        committer: user,
    }
}
