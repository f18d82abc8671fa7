//! Binary locator
//!
//! Finds the executable a build produced when its name is not known up
//! front. An executable named after the repository at the workspace root
//! always wins; otherwise the workspace is scanned in lexical order (files
//! and directories sorted by name at every level, depth first) and the first
//! extension-less executable regular file is taken.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::defaults;
use crate::error::SourceError;
use crate::infra::filesystem::{is_executable, is_executable_file};

/// Which rule selected the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// `<workspace>/<repo basename>`
    ExactName,
    /// First match of the workspace scan
    Scan,
}

/// A binary found in a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBinary {
    /// Path of the binary
    pub path: PathBuf,
    /// Rule that selected it
    pub strategy: LocateStrategy,
}

impl LocatedBinary {
    /// Basename of the binary
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Locate the single executable produced by a build in `workspace`
pub fn locate_binary(workspace: &Path, repo_basename: &str) -> Result<LocatedBinary, SourceError> {
    if let Some(path) = exact_match(workspace, repo_basename) {
        tracing::debug!("Found binary by exact name: {}", path.display());
        return Ok(LocatedBinary {
            path,
            strategy: LocateStrategy::ExactName,
        });
    }

    match scan_for_binary(workspace) {
        Some(path) => {
            tracing::debug!("Found binary by scan: {}", path.display());
            Ok(LocatedBinary {
                path,
                strategy: LocateStrategy::Scan,
            })
        }
        None => Err(SourceError::ArtifactNotFound {
            workspace: workspace.to_path_buf(),
        }),
    }
}

/// `<workspace>/<repo_basename>` if it is an executable regular file
fn exact_match(workspace: &Path, repo_basename: &str) -> Option<PathBuf> {
    if repo_basename.is_empty()
        || repo_basename == "."
        || repo_basename == ".."
        || repo_basename.contains(['/', '\\'])
    {
        return None;
    }

    let candidate = workspace.join(repo_basename);
    is_executable_file(&candidate).then_some(candidate)
}

/// First extension-less executable regular file, skipping VCS metadata
pub fn scan_for_binary(workspace: &Path) -> Option<PathBuf> {
    WalkDir::new(workspace)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != defaults::VCS_METADATA_DIR)
        .filter_map(Result::ok)
        .find(is_candidate)
        .map(DirEntry::into_path)
}

fn is_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && !entry.file_name().to_string_lossy().contains('.')
        && entry.metadata().is_ok_and(|meta| is_executable(&meta))
}
