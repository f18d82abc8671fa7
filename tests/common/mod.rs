//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_fs::TempDir;

/// Environment variables the binary reads; cleared for every run
const ISOLATED_VARS: &[&str] = &[
    "PLUGIN_SOURCES",
    "PLUGINS_DIR",
    "PLUGIN_BUILD_COMMAND",
    "PLUGIN_GIT",
    "PLUGIN_WORKSPACE_ROOT",
    "RUST_LOG",
];

/// Test environment
///
/// Owns a temporary directory holding the output directory and the
/// workspace root used by one provisioner invocation.
pub struct TestEnv {
    /// Temporary directory for the test
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the root of the test environment
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Directory plugins are installed into
    pub fn plugins_dir(&self) -> PathBuf {
        self.dir.path().join("plugins")
    }

    /// Directory build workspaces are created in
    pub fn workspace_root(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    /// Whether the workspace root holds no leftover workspaces
    pub fn workspaces_cleaned(&self) -> bool {
        match std::fs::read_dir(self.workspace_root()) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }

    /// Command for the provisioner binary with an isolated environment
    pub fn command(&self, sources: Option<&str>) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_plugin-provisioner"));
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("PLUGINS_DIR", self.plugins_dir());
        cmd.env("PLUGIN_WORKSPACE_ROOT", self.workspace_root());
        if let Some(sources) = sources {
            cmd.env("PLUGIN_SOURCES", sources);
        }
        cmd
    }

    /// Run the provisioner with the given sources and extra arguments
    pub async fn run(&self, sources: Option<&str>, args: &[&str]) -> Output {
        self.command(sources)
            .args(args)
            .output()
            .await
            .expect("Failed to execute plugin-provisioner")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether git is available for tests that clone real repositories
#[allow(dead_code)]
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Create a one-commit git repository at `dir` containing `files`
///
/// Returns a `file://` URL for cloning it.
#[allow(dead_code)]
pub fn init_git_repo(dir: &Path, files: &[(&str, &str)]) -> String {
    std::fs::create_dir_all(dir).expect("Failed to create repository directory");
    let git = |args: &[&str]| {
        let output = std::process::Command::new("git")
            .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    };

    git(&["init", "--quiet"]);
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }
    git(&["add", "."]);
    git(&["commit", "--quiet", "-m", "initial"]);

    format!("file://{}", dir.display())
}

/// Combined stdout and stderr of a run, for assertion messages
#[allow(dead_code)]
pub fn output_text(output: &Output) -> String {
    format!(
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
