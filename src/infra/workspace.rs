//! Ephemeral build workspaces
//!
//! Each repository source gets its own uniquely named directory. The
//! directory is removed by [`BuildWorkspace::close`], or on drop when an
//! early return skips the explicit close.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::defaults;
use crate::error::SourceError;

/// Exclusively owned directory for cloning and building one repository
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
}

impl BuildWorkspace {
    /// Create a fresh workspace under `root`, creating `root` if needed
    pub fn create(root: &Path) -> Result<Self, SourceError> {
        let workspace_error = |e: std::io::Error| SourceError::Workspace {
            root: root.to_path_buf(),
            error: e.to_string(),
        };

        std::fs::create_dir_all(root).map_err(workspace_error)?;
        let dir = tempfile::Builder::new()
            .prefix(defaults::WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(workspace_error)?;

        tracing::debug!("Created build workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Get the workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace, logging rather than failing on errors
    pub fn close(self) {
        let path: PathBuf = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!("Removed build workspace {}", path.display()),
            Err(e) => tracing::warn!("Error removing temp dir {}: {}", path.display(), e),
        }
    }
}
