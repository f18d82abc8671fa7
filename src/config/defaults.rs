//! Default configuration values

/// Environment variable holding the comma-separated source list
pub const ENV_SOURCES: &str = "PLUGIN_SOURCES";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "PLUGINS_DIR";

/// Environment variable overriding the build command
pub const ENV_BUILD_COMMAND: &str = "PLUGIN_BUILD_COMMAND";

/// Environment variable overriding the git executable
pub const ENV_GIT: &str = "PLUGIN_GIT";

/// Environment variable overriding where build workspaces are created
pub const ENV_WORKSPACE_ROOT: &str = "PLUGIN_WORKSPACE_ROOT";

/// Output directory for plugins (mapped to a volume in container deployments)
pub const OUTPUT_DIR: &str = "/plugins";

/// Separator between entries of the source list
pub const SOURCE_SEPARATOR: char = ',';

/// Identifiers ending in this suffix are cloned and built
pub const REPOSITORY_SUFFIX: &str = ".git";

/// Version-control metadata directory skipped by the binary scan
pub const VCS_METADATA_DIR: &str = ".git";

/// Default build command, run in the workspace root
pub const BUILD_COMMAND: &str = "make";

/// Default git executable
pub const GIT_PROGRAM: &str = "git";

/// Clone depth (latest revision only)
pub const CLONE_DEPTH: u32 = 1;

/// Prefix of build workspace directory names
pub const WORKSPACE_PREFIX: &str = "plugin-build-";

/// Prefix of the hidden staging file written next to an installed plugin
pub const STAGING_PREFIX: &str = ".install-";

/// Suffix of the staging file
pub const STAGING_SUFFIX: &str = ".partial";

/// Mode applied to every installed plugin
pub const PLUGIN_MODE: u32 = 0o755;

/// Mode applied to a freshly created output directory
pub const OUTPUT_DIR_MODE: u32 = 0o755;

/// Read buffer size used when streaming artifacts into place
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;
