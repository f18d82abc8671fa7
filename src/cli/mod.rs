//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults;
use crate::config::{BuildCommand, ProvisionConfig};
use crate::core::pipeline::Provisioner;
use crate::error::ConfigError;
use crate::infra::build_tool::BuildRunner;

use output::OutputMode;

/// Version string including the commit the binary was built from
fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} ({})",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown commit")
        )
    })
}

/// plugin-provisioner - install executable plugins from URLs and git repositories
///
/// Direct URLs are downloaded as-is. Addresses ending in `.git` are shallow
/// cloned, built, and the produced binary is installed.
#[derive(Parser, Debug)]
#[command(name = "plugin-provisioner")]
#[command(author, version, long_version = long_version(), about, long_about = None)]
pub struct Cli {
    /// Comma-separated list of plugin sources
    #[arg(long, env = defaults::ENV_SOURCES)]
    pub sources: Option<String>,

    /// Directory receiving installed plugins
    #[arg(long, env = defaults::ENV_OUTPUT_DIR, default_value = defaults::OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Build command run in each cloned repository
    #[arg(long, env = defaults::ENV_BUILD_COMMAND, default_value = defaults::BUILD_COMMAND)]
    pub build_command: String,

    /// Git executable used for cloning
    #[arg(long = "git", env = defaults::ENV_GIT, default_value = defaults::GIT_PROGRAM)]
    pub git_program: String,

    /// Directory in which build workspaces are created (defaults to the system temp dir)
    #[arg(long, env = defaults::ENV_WORKSPACE_ROOT)]
    pub workspace_root: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output the run report in JSON format for scripting
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Default log level for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Assemble the run configuration
    pub fn config(&self) -> Result<ProvisionConfig, ConfigError> {
        let mut config = ProvisionConfig::from_sources(self.sources.clone())?
            .with_output_dir(&self.output_dir)
            .with_build_command(BuildCommand::parse(&self.build_command))
            .with_git_program(&self.git_program);

        if let Some(root) = &self.workspace_root {
            config = config.with_workspace_root(root);
        }
        Ok(config)
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        }
    }

    /// Execute a provisioning run
    ///
    /// A missing source list is reported and treated as a successful no-op.
    pub async fn run(self) -> Result<()> {
        let config = match self.config() {
            Ok(config) => config,
            Err(e @ ConfigError::MissingSources { .. }) => {
                println!("{e}");
                return Ok(());
            }
        };

        let mode = self.output_mode();
        let builder = BuildRunner::new(config.build_command.clone())
            .with_stdout_to_stderr(mode == OutputMode::Json);
        let provisioner = Provisioner::new(&config).with_build_runner(builder);

        let report = provisioner.run(&config.sources).await?;
        output::print_report(&report, mode)?;
        Ok(())
    }
}
