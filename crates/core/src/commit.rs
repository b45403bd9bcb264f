// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Commit descriptor types.
//!
//! A [`Commit`] identifies the code revision a benchmark run belongs to.
//! Benchgate treats it as opaque data: only [`Commit::id`] is ever read
//! when comparing runs and rendering reports.

use serde::{Deserialize, Serialize};

/// Author or committer of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitUser {
    /// Display name.
    pub name: String,
    /// Login on the hosting platform.
    pub username: String,
    /// E-mail address, when the platform exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl GitUser {
    /// Create a user whose display name is also its login.
    pub fn from_login(login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            name: login.clone(),
            username: login,
            email: None,
        }
    }
}

/// Code revision a benchmark run was measured on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash.
    pub id: String,
    /// Commit message or, for pull requests, the title or branch label.
    pub message: String,
    /// Timestamp as reported by the hosting platform.
    pub timestamp: String,
    /// Web URL of the commit.
    pub url: String,
    /// Author of the change.
    pub author: GitUser,
    /// Committer of the change.
    pub committer: GitUser,
}
