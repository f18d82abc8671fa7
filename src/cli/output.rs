//! Output formatting
//!
//! Renders the run report as a human summary or as JSON.

use anyhow::{Context, Result};

use crate::core::pipeline::{InstallationResult, ProvisionReport};

/// How the run report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Summary with status prefixes
    Human,
    /// Failures only
    Quiet,
    /// Report as JSON on stdout
    Json,
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Render the report as text
pub fn format_report(report: &ProvisionReport, mode: OutputMode) -> String {
    let mut out = String::new();

    if report.sources.is_empty() {
        if mode == OutputMode::Human {
            out.push_str(&format!("{} No plugin sources to process\n", status::INFO));
        }
        return out;
    }

    for entry in &report.sources {
        match &entry.result {
            InstallationResult::Installed(plugin) => {
                if mode == OutputMode::Human {
                    out.push_str(&format!(
                        "{} {} -> {} ({} bytes)\n",
                        status::SUCCESS,
                        entry.source,
                        plugin.path.display(),
                        plugin.size
                    ));
                }
            }
            InstallationResult::Failed { reason, .. } => {
                out.push_str(&format!("{} {}: {}\n", status::ERROR, entry.source, reason));
            }
        }
    }

    if mode == OutputMode::Human {
        out.push_str(&format!(
            "Installed {} of {} plugin source(s) into {}\n",
            report.installed(),
            report.attempted(),
            report.output_dir.display()
        ));
    }
    out
}

/// Print the report to stdout
pub fn print_report(report: &ProvisionReport, mode: OutputMode) -> Result<()> {
    if mode == OutputMode::Json {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", format_report(report, mode));
    }
    Ok(())
}
