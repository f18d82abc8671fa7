//! plugin-provisioner - install executable plugins from URLs and git repositories
//!
//! Entry point for the plugin-provisioner command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plugin_provisioner::cli::output::status;
use plugin_provisioner::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q; logs go to stderr so stdout stays clean for --json
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugin_provisioner={}", cli.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{} {e:#}", status::ERROR);
            std::process::exit(1);
        }
    }
}
