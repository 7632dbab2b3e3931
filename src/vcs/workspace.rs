//! Scratch directory for repository checkouts.
//!
//! One workspace belongs to one orchestrated run. The directory is created on
//! first use and removed on [`ScratchWorkspace::cleanup`] or when the value is
//! dropped, whichever comes first.

use std::path::Path;

use tempfile::TempDir;

use crate::errors::GitError;

const PREFIX: &str = "storyforge-";

#[derive(Debug, Default)]
pub struct ScratchWorkspace {
    dir: Option<TempDir>,
}

impl ScratchWorkspace {
    pub fn new() -> Self {
        Self { dir: None }
    }

    /// Root of the workspace, creating the directory if needed.
    pub fn root(&mut self) -> Result<&Path, GitError> {
        let dir = match self.dir.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new()
                    .prefix(PREFIX)
                    .tempdir()
                    .map_err(|source| GitError::Io {
                        path: std::env::temp_dir(),
                        source,
                    })?;
                tracing::debug!(path = %dir.path().display(), "created scratch workspace");
                dir
            }
        };
        Ok(self.dir.insert(dir).path())
    }

    /// Root of the workspace if it has been created.
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Delete the workspace. Safe to call repeatedly; deletion errors are ignored.
    pub fn cleanup(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        if let Err(e) = dir.close() {
            tracing::debug!(path = %path.display(), error = %e, "scratch workspace removal failed");
        }
        if path.exists() {
            let _ = std::fs::remove_dir_all(&path);
        }
        tracing::debug!(path = %path.display(), "scratch workspace removed");
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_workspace_is_created_lazily() {
        let mut workspace = ScratchWorkspace::new();
        assert!(workspace.path().is_none());
        assert!(workspace.path().is_none());

        let root = workspace.root().unwrap().to_path_buf();
        assert!(root.is_dir());
        assert_eq!(workspace.path(), Some(root.as_path()));
        assert_eq!(workspace.root().unwrap(), root.as_path());
    }

    #[test]
    fn test_cleanup_twice_leaves_nothing() {
        let mut workspace = ScratchWorkspace::new();
        let root = workspace.root().unwrap().to_path_buf();
        fs::create_dir_all(root.join("repo/.git")).unwrap();
        fs::write(root.join("repo/file.txt"), "x").unwrap();

        workspace.cleanup();
        workspace.cleanup();

        assert!(!root.exists());
        assert!(workspace.path().is_none());
    }

    #[test]
    fn test_cleanup_without_allocation_is_noop() {
        let mut workspace = ScratchWorkspace::new();
        workspace.cleanup();
        assert!(workspace.path().is_none());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = {
            let mut workspace = ScratchWorkspace::new();
            workspace.root().unwrap().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_cleanup_tolerates_externally_removed_directory() {
        let mut workspace = ScratchWorkspace::new();
        let root = workspace.root().unwrap().to_path_buf();
        fs::remove_dir_all(&root).unwrap();
        workspace.cleanup();
        assert!(!root.exists());
    }

    #[test]
    fn test_new_workspace_after_cleanup_is_fresh() {
        let mut workspace = ScratchWorkspace::new();
        let first = workspace.root().unwrap().to_path_buf();
        workspace.cleanup();
        let second = workspace.root().unwrap().to_path_buf();
        assert!(!first.exists());
        assert!(second.is_dir());
    }
}
