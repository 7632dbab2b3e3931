//! Typed error hierarchy for storyforge.
//!
//! One enum per collaborator:
//! - `ConfigError`: startup configuration (fatal)
//! - `ConnectError`: tracker authentication, classified for user guidance
//! - `TrackerError`: tracker calls after authentication
//! - `HostError`: repository hosting API
//! - `GitError`: `git` subprocess and checkout file writes
//! - `GenerateError`: generative-language backend
//! - `RunError`: failures that abort an orchestrated run

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading credentials and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing required JIRA environment variables: {}. Please check your .env file.",
        .0.join(", ")
    )]
    MissingVariables(Vec<&'static str>),

    #[error("Failed to read settings file at {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Why a tracker session could not be established.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Invalid Jira Cloud URL: {url} (URL should end with {suffix})")]
    InvalidUrl { url: String, suffix: String },

    #[error("Could not find Jira site at {0}")]
    SiteNotFound(String),

    #[error("Authentication failed for {username}")]
    AuthenticationFailed { username: String },

    #[error("Connection error: {0}")]
    Connection(String),
}

pub const API_TOKEN_PAGE: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";

impl ConnectError {
    /// User-facing lines explaining how to fix the failure.
    pub fn guidance(&self) -> Vec<String> {
        match self {
            ConnectError::InvalidUrl { url, suffix } => vec![
                format!("Invalid Jira Cloud URL: {}", url),
                format!("URL should end with {}", suffix),
            ],
            ConnectError::SiteNotFound(url) => vec![
                format!("Could not find Jira site at {}", url),
                "Please verify your Jira site URL".to_string(),
            ],
            ConnectError::AuthenticationFailed { username } => vec![
                "Authentication failed. Please check your credentials:".to_string(),
                format!("1. Email: {}", username),
                "2. API Token: Verify in Atlassian Account Settings".to_string(),
                format!("Generate a new API token at: {}", API_TOKEN_PAGE),
            ],
            ConnectError::Connection(msg) => vec![format!("Connection error: {}", msg)],
        }
    }
}

/// Errors from tracker calls made with an authenticated session.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Jira returned an unusable issue key '{0}'")]
    InvalidIssueKey(String),
}

/// Errors from the repository hosting API.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch repositories: {status}")]
    Status { status: u16 },
}

/// Errors from `git` invocations and checkout preparation.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git command failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Invalid repository name '{0}'")]
    InvalidRepository(String),

    #[error("Failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the generative-language backend.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generation service returned no completion")]
    EmptyCompletion,
}

/// Failures that abort an orchestrated run part-way.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("Terminal interaction failed: {0}")]
    Prompt(#[source] std::io::Error),
}
