//! Error types for plugin-provisioner
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No source list was configured
    #[error("No {variable} configured. Nothing to provision.")]
    MissingSources { variable: String },
}

/// Errors that fail a single source without aborting the run
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status
    #[error("Failed to download '{url}': {error}")]
    Fetch { url: String, error: String },

    /// Clone tool exited unsuccessfully or could not be started
    #[error("git clone failed for '{repo}': {output}")]
    Clone { repo: String, output: String },

    /// Build tool exited unsuccessfully or could not be started
    #[error("Build failed for '{repo}': {error}")]
    Build { repo: String, error: String },

    /// Neither locator strategy produced a candidate
    #[error("No executable binary found after build in '{workspace}'")]
    ArtifactNotFound { workspace: PathBuf },

    /// Destination creation, copy or permission change failed
    #[error("Failed to write '{path}': {error}")]
    Write { path: PathBuf, error: String },

    /// Derived destination name cannot be used inside the output directory
    #[error("Refusing to install under file name '{name}'")]
    InvalidFileName { name: String },

    /// Build workspace could not be created
    #[error("Failed to create build workspace in '{root}': {error}")]
    Workspace { root: PathBuf, error: String },
}

/// Coarse failure classification used in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Clone,
    Build,
    ArtifactNotFound,
    Write,
    InvalidFileName,
    Workspace,
}

impl SourceError {
    /// Classification of this error for reporting
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Fetch { .. } => FailureKind::Fetch,
            Self::Clone { .. } => FailureKind::Clone,
            Self::Build { .. } => FailureKind::Build,
            Self::ArtifactNotFound { .. } => FailureKind::ArtifactNotFound,
            Self::Write { .. } => FailureKind::Write,
            Self::InvalidFileName { .. } => FailureKind::InvalidFileName,
            Self::Workspace { .. } => FailureKind::Workspace,
        }
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Path exists but is not a directory
    #[error("'{path}' exists and is not a directory")]
    NotADirectory { path: PathBuf },
}

/// Errors that abort the whole run before any source is processed
///
/// Configuration problems are handled by the caller before a run starts.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Output directory could not be prepared
    #[error("Error creating plugins directory: {0}")]
    OutputDir(#[from] FilesystemError),
}
