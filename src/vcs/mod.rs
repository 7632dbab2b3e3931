//! Repository hosting and local version control.
//!
//! - [`github`] lists repositories through the hosting REST API
//! - [`git`] drives the `git` command-line tool
//! - [`workspace`] owns the scratch directory checkouts live in

pub mod git;
pub mod github;
pub mod workspace;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::errors::{GitError, HostError};

pub use git::GitCli;
pub use github::GitHubClient;
pub use workspace::ScratchWorkspace;

static REPO_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("repository name regex is valid"));

/// Whether `name` is a single plain path component usable as a checkout directory.
pub fn is_valid_repo_name(name: &str) -> bool {
    name != "." && name != ".." && REPO_NAME_RE.is_match(name)
}

#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Names of the repositories owned by the configured user, in API order.
    async fn list_repositories(&self) -> Result<Vec<String>, HostError>;

    /// Authenticated URL `git clone` should use for `repo`.
    fn clone_url(&self, repo: &str) -> String;
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    async fn create_branch(&self, repo: &Path, branch: &str) -> Result<(), GitError>;

    /// Stage everything, commit, and push `branch` upstream; stops at the first failure.
    async fn commit_and_push(&self, repo: &Path, branch: &str, message: &str)
    -> Result<(), GitError>;
}

/// Return the checkout of `repo` inside the workspace, cloning it on first use.
///
/// Names that could resolve outside the workspace are rejected before any
/// directory is created.
pub async fn checkout(
    workspace: &mut ScratchWorkspace,
    host: &dyn RepositoryHost,
    git: &dyn VersionControl,
    repo: &str,
) -> Result<PathBuf, GitError> {
    if !is_valid_repo_name(repo) {
        return Err(GitError::InvalidRepository(repo.to_string()));
    }
    let repo_path = workspace.root()?.join(repo);
    if repo_path.exists() {
        tracing::debug!(path = %repo_path.display(), "reusing existing checkout");
    } else {
        git.clone_repo(&host.clone_url(repo), &repo_path).await?;
    }
    Ok(repo_path)
}
