//! Configuration and constants
//!
//! [`ProvisionConfig`] is built once at startup (from CLI flags and the
//! environment) and passed explicitly into the pipeline driver.

pub mod defaults;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Command used to build a cloned repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Program to execute
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl BuildCommand {
    /// Create a build command from a program and its arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace-separated command line
    ///
    /// A blank line yields the default command.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some(program) => Self::new(program, parts),
            None => Self::default(),
        }
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::new(defaults::BUILD_COMMAND, Vec::<String>::new())
    }
}

impl std::fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Settings for one provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Raw comma-separated source list
    pub sources: String,
    /// Directory receiving installed plugins
    pub output_dir: PathBuf,
    /// Build command run inside each workspace
    pub build_command: BuildCommand,
    /// Git executable used for cloning
    pub git_program: String,
    /// Parent directory of build workspaces
    pub workspace_root: PathBuf,
}

impl ProvisionConfig {
    /// Create a configuration with default settings for the given source list
    pub fn new(sources: impl Into<String>) -> Self {
        Self {
            sources: sources.into(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            build_command: BuildCommand::default(),
            git_program: defaults::GIT_PROGRAM.to_string(),
            workspace_root: std::env::temp_dir(),
        }
    }

    /// Build a configuration from an optional source list
    ///
    /// An absent or empty list is a [`ConfigError::MissingSources`].
    pub fn from_sources(sources: Option<String>) -> Result<Self, ConfigError> {
        match sources {
            Some(sources) if !sources.is_empty() => Ok(Self::new(sources)),
            _ => Err(ConfigError::MissingSources {
                variable: defaults::ENV_SOURCES.to_string(),
            }),
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the build command
    pub fn with_build_command(mut self, build_command: BuildCommand) -> Self {
        self.build_command = build_command;
        self
    }

    /// Set the git executable
    pub fn with_git_program(mut self, git_program: impl Into<String>) -> Self {
        self.git_program = git_program.into();
        self
    }

    /// Set the parent directory of build workspaces
    pub fn with_workspace_root(mut self, workspace_root: impl Into<PathBuf>) -> Self {
        self.workspace_root = workspace_root.into();
        self
    }
}
