//! Build tool invocation
//!
//! Runs the configured build command inside a workspace. The child's output
//! is not captured: it streams straight to the host so failed builds can be
//! diagnosed from the provisioner's own logs.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::BuildCommand;
use crate::error::SourceError;
use crate::infra::process::locate_program;

/// Runs a [`BuildCommand`] in a working directory
#[derive(Debug, Clone, Default)]
pub struct BuildRunner {
    command: BuildCommand,
    /// Send the child's stdout to our stderr (keeps stdout machine-readable)
    stdout_to_stderr: bool,
}

impl BuildRunner {
    /// Create a runner for `command`
    pub fn new(command: BuildCommand) -> Self {
        Self {
            command,
            stdout_to_stderr: false,
        }
    }

    /// Route the build's stdout to this process's stderr
    pub fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    /// Get the build command
    pub fn command(&self) -> &BuildCommand {
        &self.command
    }

    /// Run the build for `repo` with `workdir` as working directory
    pub async fn run(&self, repo: &str, workdir: &Path) -> Result<(), SourceError> {
        let build_error = |error: String| SourceError::Build {
            repo: repo.to_string(),
            error,
        };

        let program = locate_program(&self.command.program).map_err(build_error)?;

        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };

        let status = Command::new(program)
            .args(&self.command.args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| build_error(format!("failed to run '{}': {e}", self.command)))?;

        if !status.success() {
            return Err(build_error(format!("'{}' exited with {status}", self.command)));
        }
        Ok(())
    }
}
