//! Git operations
//!
//! Shallow-clones repositories by shelling out to the git executable.
//! Cloning sits behind [`RepositoryCloner`] so the build pipeline can be
//! driven without network access.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::defaults;
use crate::error::SourceError;
use crate::infra::process::{combined_output, locate_program};

/// Fetches a repository's latest revision into a directory
#[async_trait]
pub trait RepositoryCloner: Send + Sync {
    /// Clone `repo` into the empty directory `dest`
    async fn clone_shallow(&self, repo: &str, dest: &Path) -> Result<(), SourceError>;
}

/// Clones with `git clone --depth 1`
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Git executable
    program: String,
}

impl GitCli {
    /// Create a cloner using the given git executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Get the git executable
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(defaults::GIT_PROGRAM)
    }
}

#[async_trait]
impl RepositoryCloner for GitCli {
    async fn clone_shallow(&self, repo: &str, dest: &Path) -> Result<(), SourceError> {
        let clone_error = |output: String| SourceError::Clone {
            repo: repo.to_string(),
            output,
        };

        let git = locate_program(&self.program).map_err(clone_error)?;

        let output = Command::new(git)
            .arg("clone")
            .arg("--depth")
            .arg(defaults::CLONE_DEPTH.to_string())
            .arg("--")
            .arg(repo)
            .arg(dest)
            // Never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| clone_error(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(clone_error(combined_output(&output)));
        }

        tracing::debug!("Cloned {} into {}", repo, dest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    /// Create a one-commit repository and return its file:// URL
    fn init_repo(dir: &Path, files: &[(&str, &str)]) -> String {
        let run = |args: &[&str]| {
            let status = std::process::Command::new("git")
                .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
                .args(args)
                .current_dir(dir)
                .output()
                .unwrap();
            assert!(status.status.success(), "git {args:?} failed");
        };

        run(&["init", "--quiet"]);
        for (name, content) in files {
            std::fs::write(dir.join(name), content).unwrap();
        }
        run(&["add", "."]);
        run(&["commit", "--quiet", "-m", "initial"]);

        format!("file://{}", dir.display())
    }

    #[test]
    fn test_git_cli_default_program() {
        assert_eq!(GitCli::default().program(), "git");
    }

    #[tokio::test]
    async fn test_clone_missing_git_program() {
        let temp = TempDir::new().unwrap();
        let cloner = GitCli::new("no-such-git-binary-xyz");

        let result = cloner
            .clone_shallow("https://example.com/foo.git", temp.path())
            .await;

        match result {
            Err(SourceError::Clone { repo, output }) => {
                assert_eq!(repo, "https://example.com/foo.git");
                assert!(output.contains("not found"));
            }
            other => panic!("Expected Clone error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clone_bad_address_reports_git_output() {
        if !git_available() {
            eprintln!("skipping: git not installed");
            return;
        }
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist.git");
        let dest = temp.path().join("dest");
        std::fs::create_dir(&dest).unwrap();

        let result = GitCli::default()
            .clone_shallow(&format!("file://{}", missing.display()), &dest)
            .await;

        match result {
            Err(SourceError::Clone { output, .. }) => assert!(!output.is_empty()),
            other => panic!("Expected Clone error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clone_local_repository() {
        if !git_available() {
            eprintln!("skipping: git not installed");
            return;
        }
        let origin = TempDir::new().unwrap();
        let url = init_repo(origin.path(), &[("Makefile", "all:\n\ttrue\n")]);
        let dest = TempDir::new().unwrap();

        GitCli::default()
            .clone_shallow(&url, dest.path())
            .await
            .unwrap();

        assert!(dest.path().join("Makefile").exists());
        assert!(dest.path().join(".git").is_dir());
    }
}
