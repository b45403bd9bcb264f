// Copyright 2025 Benchgate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reference to the CI workflow that produced a report.

use serde::{Deserialize, Serialize};

/// Repository and workflow a report links back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRef {
    /// Web URL of the repository, e.g. `https://github.com/user/repo`.
    pub repository_url: String,
    /// Workflow name as shown by the CI provider.
    pub workflow: String,
}

impl WorkflowRef {
    /// Create a new workflow reference.
    pub fn new(repository_url: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            workflow: workflow.into(),
        }
    }
}
