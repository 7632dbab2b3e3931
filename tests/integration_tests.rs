//! Integration tests for the storyforge binary
//!
//! These drive the CLI end to end without any network access: every test
//! either stops before the first request or fails locally.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VARIABLES: &[&str] = &[
    "JIRA_INSTANCE_URL",
    "JIRA_USERNAME",
    "JIRA_API_TOKEN",
    "GITHUB_USERNAME",
    "GITHUB_TOKEN",
    "AZURE_OPENAI_ENDPOINT",
    "AZURE_OPENAI_API_KEY",
    "AZURE_OPENAI_DEPLOYMENT",
    "AZURE_OPENAI_API_VERSION",
];

/// Helper to create a storyforge Command isolated from the caller's
/// environment and config directory
fn storyforge(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("storyforge");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG");
    for name in VARIABLES {
        cmd.env_remove(name);
    }
    cmd
}

fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_storyforge_help() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("projects"))
            .stdout(predicate::str::contains("repos"));
    }

    #[test]
    fn test_storyforge_version() {
        let dir = create_temp_dir();
        storyforge(&dir).arg("--version").assert().success();
    }

    #[test]
    fn test_run_help_lists_presets() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .args(["run", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--story"))
            .stdout(predicate::str::contains("--yes"));
    }
}

// =============================================================================
// Startup Credential Checks
// =============================================================================

mod credentials {
    use super::*;

    #[test]
    fn test_default_command_fails_without_jira_variables() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Missing required JIRA environment variables: JIRA_API_TOKEN, JIRA_USERNAME, JIRA_INSTANCE_URL",
            ))
            .stderr(predicate::str::contains(".env file"));
    }

    #[test]
    fn test_only_absent_variables_are_reported() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .arg("run")
            .env("JIRA_INSTANCE_URL", "https://acme.atlassian.net")
            .env("JIRA_USERNAME", "dev@example.com")
            .assert()
            .failure()
            .stderr(predicate::str::contains("variables: JIRA_API_TOKEN."));
    }

    #[test]
    fn test_listing_commands_need_credentials_too() {
        let dir = create_temp_dir();
        for command in ["projects", "repos"] {
            storyforge(&dir)
                .arg(command)
                .assert()
                .failure()
                .stderr(predicate::str::contains("JIRA_API_TOKEN"));
        }
    }

    #[test]
    fn test_env_file_supplies_credentials() {
        let dir = create_temp_dir();
        let env_file = dir.path().join("creds.env");
        fs::write(
            &env_file,
            "JIRA_INSTANCE_URL=https://acme.example.com\nJIRA_USERNAME=dev@example.com\nJIRA_API_TOKEN=t0ken\n",
        )
        .unwrap();

        // Credentials load, then the URL is rejected before any request.
        storyforge(&dir)
            .args(["run", "--yes", "--env-file"])
            .arg(&env_file)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid Jira Cloud URL"))
            .stdout(predicate::str::contains(
                "Failed to connect to JIRA. Please check your credentials and instance URL.",
            ));
    }

    #[test]
    fn test_dotenv_in_working_directory_is_loaded() {
        let dir = create_temp_dir();
        fs::write(dir.path().join(".env"), "JIRA_API_TOKEN=from-dotenv\n").unwrap();

        storyforge(&dir)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("JIRA_API_TOKEN set"))
            .stdout(predicate::str::contains("from-dotenv").not());
    }

    #[test]
    fn test_missing_explicit_env_file_fails() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .args(["config", "--env-file", "nope.env"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("nope.env"));
    }
}

// =============================================================================
// Run Presets
// =============================================================================

mod presets {
    use super::*;

    #[test]
    fn test_repo_preset_outside_workspace_is_rejected() {
        let dir = create_temp_dir();
        for repo in ["../x", "/tmp/elsewhere"] {
            storyforge(&dir)
                .args(["run", "--yes", "--story", "Add login", "--repo", repo])
                .env("JIRA_INSTANCE_URL", "https://acme.atlassian.net")
                .env("JIRA_USERNAME", "dev@example.com")
                .env("JIRA_API_TOKEN", "t0ken")
                .assert()
                .failure()
                .stdout(predicate::str::contains(format!(
                    "Invalid repository name: {}",
                    repo
                )))
                .stdout(predicate::str::contains("Successfully connected").not());
        }
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_shows_defaults() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using default settings"))
            .stdout(predicate::str::contains("branch_prefix = \"feature/\""))
            .stdout(predicate::str::contains("max_tokens = 2000"))
            .stdout(predicate::str::contains("JIRA_API_TOKEN not set"));
    }

    #[test]
    fn test_config_reads_local_settings_file() {
        let dir = create_temp_dir();
        fs::write(
            dir.path().join("storyforge.toml"),
            "[repository]\nbranch_prefix = \"story/\"\nfile_extension = \"py\"\n",
        )
        .unwrap();

        storyforge(&dir)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Settings file:"))
            .stdout(predicate::str::contains("branch_prefix = \"story/\""))
            .stdout(predicate::str::contains("file_extension = \"py\""))
            .stdout(predicate::str::contains("subtask_type = \"Subtask\""));
    }

    #[test]
    fn test_config_never_prints_secret_values() {
        let dir = create_temp_dir();
        storyforge(&dir)
            .arg("config")
            .env("GITHUB_TOKEN", "ghp_supersecret")
            .assert()
            .success()
            .stdout(predicate::str::contains("GITHUB_TOKEN set"))
            .stdout(predicate::str::contains("ghp_supersecret").not());
    }

    #[test]
    fn test_invalid_settings_file_fails() {
        let dir = create_temp_dir();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[repository\nbranch_prefix = 1").unwrap();

        storyforge(&dir)
            .arg("config")
            .arg("--config")
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse settings file"));
    }
}
