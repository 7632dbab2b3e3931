//! Issue tracker abstraction.
//!
//! The orchestrator talks to the tracker only through [`IssueTracker`];
//! [`JiraClient`] is the production implementation.

pub mod jira;

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ConnectError, TrackerError};

pub use jira::JiraClient;

static ISSUE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*-[0-9]+$").expect("issue key regex is valid"));

/// A tracker issue key such as `PROJ-42`.
///
/// Keys end up in branch and file names, so anything outside the tracker's
/// key grammar is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    pub fn parse(raw: &str) -> Result<Self, TrackerError> {
        if ISSUE_KEY_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TrackerError::InvalidIssueKey(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

impl Project {
    /// Label shown in the selection list.
    pub fn label(&self) -> String {
        format!("{}: {}", self.key, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueType {
    pub name: String,
    #[serde(rename = "subtask", default)]
    pub is_subtask: bool,
}

/// Names of the issue types a user may pick for the main issue.
pub fn standard_issue_types(types: &[IssueType]) -> Vec<String> {
    types
        .iter()
        .filter(|t| !t.is_subtask)
        .map(|t| t.name.clone())
        .collect()
}

/// Fields for a new issue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub parent: Option<IssueKey>,
}

/// A created issue and its browse link.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    pub key: IssueKey,
    pub link: String,
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Verify the credentials; returns the authenticated user's display name.
    async fn authenticate(&self) -> Result<String, ConnectError>;

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError>;

    async fn list_issue_types(&self, project_key: &str) -> Result<Vec<IssueType>, TrackerError>;

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError>;
}
