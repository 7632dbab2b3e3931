//! Credential loading from the process environment.
//!
//! Tracker credentials are mandatory and checked at startup. Repository and
//! generation credentials are read as-is; a missing value surfaces later as a
//! failed call against the corresponding service.

use std::fmt;
use std::path::Path;

use crate::errors::ConfigError;

pub const JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const JIRA_USERNAME: &str = "JIRA_USERNAME";
pub const JIRA_INSTANCE_URL: &str = "JIRA_INSTANCE_URL";
pub const GITHUB_USERNAME: &str = "GITHUB_USERNAME";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";

/// Every variable the tool reads, in display order.
pub const ALL_VARIABLES: &[&str] = &[
    JIRA_INSTANCE_URL,
    JIRA_USERNAME,
    JIRA_API_TOKEN,
    GITHUB_USERNAME,
    GITHUB_TOKEN,
    AZURE_OPENAI_ENDPOINT,
    AZURE_OPENAI_API_KEY,
    AZURE_OPENAI_DEPLOYMENT,
    AZURE_OPENAI_API_VERSION,
];

#[derive(Clone)]
pub struct TrackerCredentials {
    pub url: String,
    pub username: String,
    pub token: String,
}

#[derive(Clone, Default)]
pub struct RepositoryCredentials {
    pub username: String,
    pub token: String,
}

#[derive(Clone, Default)]
pub struct GeneratorCredentials {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

/// All credentials, loaded once and never mutated afterwards.
#[derive(Clone)]
pub struct Credentials {
    pub tracker: TrackerCredentials,
    pub repository: RepositoryCredentials,
    pub generator: GeneratorCredentials,
}

impl Credentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup function.
    ///
    /// Empty values count as missing. All missing tracker variables are
    /// reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = read(JIRA_INSTANCE_URL);
        let username = read(JIRA_USERNAME);
        let token = read(JIRA_API_TOKEN);

        let (url, username, token) = match (url, username, token) {
            (Some(url), Some(username), Some(token)) => (url, username, token),
            (url, username, token) => {
                let missing = [
                    (JIRA_API_TOKEN, token.is_none()),
                    (JIRA_USERNAME, username.is_none()),
                    (JIRA_INSTANCE_URL, url.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ConfigError::MissingVariables(missing));
            }
        };

        let credentials = Self {
            tracker: TrackerCredentials {
                url,
                username,
                token,
            },
            repository: RepositoryCredentials {
                username: read(GITHUB_USERNAME).unwrap_or_default(),
                token: read(GITHUB_TOKEN).unwrap_or_default(),
            },
            generator: GeneratorCredentials {
                endpoint: read(AZURE_OPENAI_ENDPOINT).unwrap_or_default(),
                api_key: read(AZURE_OPENAI_API_KEY).unwrap_or_default(),
                deployment: read(AZURE_OPENAI_DEPLOYMENT).unwrap_or_default(),
                api_version: read(AZURE_OPENAI_API_VERSION).unwrap_or_default(),
            },
        };

        tracing::debug!(
            instance_url = %credentials.tracker.url,
            username = %credentials.tracker.username,
            token_len = credentials.tracker.token.len(),
            "JIRA configuration loaded"
        );

        Ok(credentials)
    }
}

/// Load a dotenv file into the process environment.
///
/// An explicit path must exist. Without one, `.env` in the working directory
/// is loaded if present. Variables already set in the environment win.
pub fn load_env_file(path: Option<&Path>) -> anyhow::Result<()> {
    use anyhow::Context;

    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded env file");
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                tracing::debug!(path = %path.display(), "loaded env file");
            }
        }
    }
    Ok(())
}

fn secret(value: &str) -> &'static str {
    if value.is_empty() { "<unset>" } else { "<redacted>" }
}

impl fmt::Debug for TrackerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("token", &secret(&self.token))
            .finish()
    }
}

impl fmt::Debug for RepositoryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryCredentials")
            .field("username", &self.username)
            .field("token", &secret(&self.token))
            .finish()
    }
}

impl fmt::Debug for GeneratorCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorCredentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &secret(&self.api_key))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tracker", &self.tracker)
            .field("repository", &self.repository)
            .field("generator", &self.generator)
            .finish()
    }
}
