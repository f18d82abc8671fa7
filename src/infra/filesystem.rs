//! Filesystem operations
//!
//! Handles directory setup and permission checks.

use std::fs::Metadata;
use std::path::Path;

use crate::config::defaults;
use crate::error::FilesystemError;

/// Execute bits for owner, group and other
const ANY_EXECUTE: u32 = 0o111;

/// Create the output directory (and parents) if absent
pub fn ensure_output_dir(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() && !path.is_dir() {
        return Err(FilesystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(defaults::OUTPUT_DIR_MODE);
    }

    builder
        .create(path)
        .map_err(|e| FilesystemError::CreateDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

/// Whether metadata describes a non-directory with any execute bit set
#[cfg(unix)]
pub fn is_executable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    !meta.is_dir() && meta.permissions().mode() & ANY_EXECUTE != 0
}

#[cfg(not(unix))]
pub fn is_executable(meta: &Metadata) -> bool {
    !meta.is_dir()
}

/// Whether the path is an executable regular file
///
/// Symlinks are not followed: a link never qualifies, whatever it points at.
pub fn is_executable_file(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .is_ok_and(|meta| meta.file_type().is_file() && is_executable(&meta))
}

/// Apply the plugin mode to a file
#[cfg(unix)]
pub fn set_plugin_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(defaults::PLUGIN_MODE))
}

#[cfg(not(unix))]
pub fn set_plugin_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
