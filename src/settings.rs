//! Non-secret settings loaded from `storyforge.toml`.
//!
//! Every field has a default, so the file is optional and may be partial.
//!
//! # File format
//!
//! ```toml
//! [tracker]
//! cloud_suffix = ".atlassian.net"
//! subtask_type = "Subtask"
//! subtask_summary_prefix = "Development: "
//!
//! [repository]
//! api_base = "https://api.github.com"
//! clone_host = "github.com"
//! branch_prefix = "feature/"
//! file_extension = "py"
//!
//! [generation]
//! max_tokens = 2000
//! temperature = 0.5
//! code_language = "Python"
//! ```
//!
//! Lookup order: `--config <path>`, `./storyforge.toml`, then
//! `<config dir>/storyforge/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const SETTINGS_FILE: &str = "storyforge.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Domain suffix every Jira Cloud site URL must end with
    #[serde(default = "default_cloud_suffix")]
    pub cloud_suffix: String,
    /// Issue type used for the development subtask; not checked against the project
    #[serde(default = "default_subtask_type")]
    pub subtask_type: String,
    #[serde(default = "default_subtask_summary_prefix")]
    pub subtask_summary_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_clone_host")]
    pub clone_host: String,
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
    /// Appended to generated file names when non-empty (without the dot)
    #[serde(default)]
    pub file_extension: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Language named in the sample-code prompt
    #[serde(default = "default_code_language")]
    pub code_language: String,
}

fn default_cloud_suffix() -> String {
    ".atlassian.net".to_string()
}

fn default_subtask_type() -> String {
    "Subtask".to_string()
}

fn default_subtask_summary_prefix() -> String {
    "Development: ".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_clone_host() -> String {
    "github.com".to_string()
}

fn default_branch_prefix() -> String {
    "feature/".to_string()
}

fn default_user_agent() -> String {
    concat!("storyforge/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant that generates content based on user stories.".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.5
}

fn default_code_language() -> String {
    "Python".to_string()
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            cloud_suffix: default_cloud_suffix(),
            subtask_type: default_subtask_type(),
            subtask_summary_prefix: default_subtask_summary_prefix(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            clone_host: default_clone_host(),
            branch_prefix: default_branch_prefix(),
            file_extension: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            code_language: default_code_language(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the settings file to use, if any.
    pub fn locate(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = working_dir.join(SETTINGS_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("storyforge").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load from the resolved location, or fall back to defaults.
    ///
    /// Returns the path that was used alongside the settings.
    pub fn load_or_default(
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match Self::locate(explicit, working_dir) {
            Some(path) => {
                let settings = Self::load(&path)?;
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok((settings, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }
}
