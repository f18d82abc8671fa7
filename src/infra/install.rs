//! Atomic plugin installation
//!
//! Streams an artifact into a hidden staging file inside the output
//! directory, marks it executable and renames it over the destination. A
//! consumer polling the output directory only ever sees complete plugins.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::config::defaults;
use crate::error::SourceError;
use crate::infra::filesystem::set_plugin_permissions;

/// An executable byte stream pending installation
#[derive(Debug)]
pub struct Artifact<R> {
    /// Name the plugin is installed under
    pub file_name: String,
    /// Source of the plugin's bytes
    pub reader: R,
}

impl<R> Artifact<R> {
    /// Create an artifact
    pub fn new(file_name: impl Into<String>, reader: R) -> Self {
        Self {
            file_name: file_name.into(),
            reader,
        }
    }
}

/// A plugin written to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledPlugin {
    /// File name inside the output directory
    pub name: String,
    /// Full path of the installed file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA256 checksum of the installed content
    pub sha256: String,
}

/// Writes artifacts into the output directory
#[derive(Debug, Clone)]
pub struct Installer {
    output_dir: PathBuf,
}

impl Installer {
    /// Create an installer targeting `output_dir`
    ///
    /// The directory must already exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Install an artifact under its file name with mode `0755`
    ///
    /// On any failure the staging file is removed and an existing plugin
    /// with the same name is left untouched.
    pub async fn install<R>(&self, artifact: Artifact<R>) -> Result<InstalledPlugin, SourceError>
    where
        R: AsyncRead + Unpin,
    {
        let Artifact {
            file_name,
            mut reader,
        } = artifact;
        validate_file_name(&file_name)?;

        let dest = self.output_dir.join(&file_name);
        let write_error = |error: String| SourceError::Write {
            path: dest.clone(),
            error,
        };

        // Removed on drop unless persisted; the staging name must not grow
        // with `file_name`
        let staging = tempfile::Builder::new()
            .prefix(defaults::STAGING_PREFIX)
            .suffix(defaults::STAGING_SUFFIX)
            .tempfile_in(&self.output_dir)
            .map_err(|e| write_error(e.to_string()))?;

        let handle = staging
            .as_file()
            .try_clone()
            .map_err(|e| write_error(e.to_string()))?;
        let mut file = tokio::fs::File::from_std(handle);

        let mut hasher = Sha256::new();
        let mut size: u64 = 0;
        let mut buf = vec![0u8; defaults::COPY_BUFFER_SIZE];

        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| write_error(format!("failed reading artifact: {e}")))?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .await
                .map_err(|e| write_error(e.to_string()))?;
            hasher.update(&buf[..n]);
            size += n as u64;
        }

        file.flush().await.map_err(|e| write_error(e.to_string()))?;
        file.sync_all()
            .await
            .map_err(|e| write_error(e.to_string()))?;
        drop(file);

        set_plugin_permissions(staging.path()).map_err(|e| write_error(e.to_string()))?;

        staging
            .persist(&dest)
            .map_err(|e| write_error(e.error.to_string()))?;

        let sha256 = hex::encode(hasher.finalize());
        tracing::debug!("Installed {} ({} bytes, sha256 {})", dest.display(), size, sha256);

        Ok(InstalledPlugin {
            name: file_name,
            path: dest,
            size,
            sha256,
        })
    }
}

/// Reject names that would escape or alias the output directory
pub fn validate_file_name(name: &str) -> Result<(), SourceError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(SourceError::InvalidFileName {
            name: name.to_string(),
        });
    }
    Ok(())
}
