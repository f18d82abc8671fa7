//! Provisioning pipeline
//!
//! Drives every configured source through classification, acquisition and
//! installation. Sources are processed one at a time, in configured order;
//! a failing source is recorded and the next one is attempted.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::ProvisionConfig;
use crate::core::locator::locate_binary;
use crate::core::source::{parse_sources, repo_basename, SourceKind, SourceSpec};
use crate::error::{FailureKind, ProvisionError, SourceError};
use crate::infra::build_tool::BuildRunner;
use crate::infra::download::DownloadManager;
use crate::infra::filesystem::ensure_output_dir;
use crate::infra::git::{GitCli, RepositoryCloner};
use crate::infra::install::{Artifact, InstalledPlugin, Installer};
use crate::infra::workspace::BuildWorkspace;

/// Outcome for one source
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallationResult {
    /// Plugin written to the output directory
    Installed(InstalledPlugin),
    /// Source skipped for this run
    Failed { failure: FailureKind, reason: String },
}

impl InstallationResult {
    /// Whether the plugin was installed
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }
}

impl From<Result<InstalledPlugin, SourceError>> for InstallationResult {
    fn from(result: Result<InstalledPlugin, SourceError>) -> Self {
        match result {
            Ok(plugin) => Self::Installed(plugin),
            Err(e) => Self::Failed {
                failure: e.kind(),
                reason: e.to_string(),
            },
        }
    }
}

/// Report line for one source
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    /// Raw source identifier
    pub source: String,
    /// How the source was acquired
    pub kind: SourceKind,
    /// What happened
    #[serde(flatten)]
    pub result: InstallationResult,
}

/// Result of a provisioning run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionReport {
    /// Output directory plugins were installed into
    pub output_dir: PathBuf,
    /// One entry per attempted source, in configured order
    pub sources: Vec<SourceReport>,
}

impl ProvisionReport {
    /// Number of sources attempted
    pub fn attempted(&self) -> usize {
        self.sources.len()
    }

    /// Number of sources installed
    pub fn installed(&self) -> usize {
        self.sources.iter().filter(|s| s.result.is_installed()).count()
    }

    /// Number of sources that failed
    pub fn failed(&self) -> usize {
        self.attempted() - self.installed()
    }
}

/// Acquires and installs plugins
pub struct Provisioner {
    installer: Installer,
    downloader: DownloadManager,
    cloner: Box<dyn RepositoryCloner>,
    builder: BuildRunner,
    workspace_root: PathBuf,
}

impl std::fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("installer", &self.installer)
            .field("builder", &self.builder)
            .field("workspace_root", &self.workspace_root)
            .finish_non_exhaustive()
    }
}

impl Provisioner {
    /// Create a provisioner from configuration
    pub fn new(config: &ProvisionConfig) -> Self {
        Self {
            installer: Installer::new(&config.output_dir),
            downloader: DownloadManager::new(),
            cloner: Box::new(GitCli::new(&config.git_program)),
            builder: BuildRunner::new(config.build_command.clone()),
            workspace_root: config.workspace_root.clone(),
        }
    }

    /// Replace the repository cloner
    pub fn with_cloner(mut self, cloner: impl RepositoryCloner + 'static) -> Self {
        self.cloner = Box::new(cloner);
        self
    }

    /// Replace the build runner
    pub fn with_build_runner(mut self, builder: BuildRunner) -> Self {
        self.builder = builder;
        self
    }

    /// Replace the download manager
    pub fn with_downloader(mut self, downloader: DownloadManager) -> Self {
        self.downloader = downloader;
        self
    }

    /// Prepare the output directory, then provision every source in `raw_sources`
    ///
    /// Only output-directory failure aborts the run; per-source failures are
    /// reported in the returned [`ProvisionReport`].
    pub async fn run(&self, raw_sources: &str) -> Result<ProvisionReport, ProvisionError> {
        ensure_output_dir(self.installer.output_dir())?;
        let sources = parse_sources(raw_sources);
        Ok(self.provision(&sources).await)
    }

    /// Provision each source in order
    pub async fn provision(&self, sources: &[SourceSpec]) -> ProvisionReport {
        let mut report = ProvisionReport {
            output_dir: self.installer.output_dir().to_path_buf(),
            sources: Vec::with_capacity(sources.len()),
        };

        for source in sources {
            tracing::info!("Processing source: {}", source);

            let result = self.provision_source(source).await;
            match &result {
                Ok(plugin) => tracing::info!(
                    "Successfully installed {} as {}",
                    source,
                    plugin.path.display()
                ),
                Err(e) => tracing::error!("Error processing {}: {}", source, e),
            }

            report.sources.push(SourceReport {
                source: source.identifier().to_string(),
                kind: source.kind(),
                result: result.into(),
            });
        }

        report
    }

    /// Acquire and install a single source
    pub async fn provision_source(&self, source: &SourceSpec) -> Result<InstalledPlugin, SourceError> {
        match source.kind() {
            SourceKind::DirectDownload => {
                self.downloader
                    .fetch(source.identifier(), &self.installer)
                    .await
            }
            SourceKind::GitRepository => self.build_repository(source.identifier()).await,
        }
    }

    /// Clone, build and install a repository in a fresh workspace
    async fn build_repository(&self, repo: &str) -> Result<InstalledPlugin, SourceError> {
        let workspace = BuildWorkspace::create(&self.workspace_root)?;
        let result = self.build_in_workspace(repo, &workspace).await;
        workspace.close();
        result
    }

    async fn build_in_workspace(
        &self,
        repo: &str,
        workspace: &BuildWorkspace,
    ) -> Result<InstalledPlugin, SourceError> {
        tracing::info!("  - Cloning repository...");
        self.cloner.clone_shallow(repo, workspace.path()).await?;

        tracing::info!("  - Running {}...", self.builder.command());
        self.builder.run(repo, workspace.path()).await?;

        let located = locate_binary(workspace.path(), &repo_basename(repo))?;
        let file = tokio::fs::File::open(&located.path)
            .await
            .map_err(|e| SourceError::Write {
                path: located.path.clone(),
                error: format!("failed to open built binary: {e}"),
            })?;

        self.installer
            .install(Artifact::new(located.file_name(), file))
            .await
    }
}
