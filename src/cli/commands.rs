//! Command implementations

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::config_initialization::initialize_configuration;
use crate::domain::model::{RunReport, VariantStatus};
use crate::utils::Utils;

/// Execute a run and report its outcome.
///
/// Returns `Err` when the run aborted or when any variant failed, so the
/// process exits non-zero in both cases.
pub fn run(cli: &Cli) -> Result<()> {
    let config = initialize_configuration(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration")?;

    let container = DefaultAppContainer::new(config);
    let report = container.orchestrator().run(&cli.content_dir)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize run report to JSON")?;
        println!("{}", json);
    } else {
        display_report(&report);
    }

    if report.all_succeeded() {
        info!("Process complete");
        Ok(())
    } else {
        error!("{} variant(s) failed", report.failed_count());
        Err(anyhow::anyhow!(
            "{} of {} variant(s) failed",
            report.failed_count(),
            report.outcomes.len()
        ))
    }
}

/// Display the run report in human-readable format
fn display_report(report: &RunReport) {
    println!("Run Summary");
    println!("===========");
    println!("Content: {}", report.content_dir.display());
    for outcome in &report.outcomes {
        match &outcome.status {
            VariantStatus::Completed {
                output,
                segments,
                skipped,
                size_bytes,
            } => {
                println!("  ✓ {}: {}", outcome.variant, output.display());
                println!(
                    "    {} segment(s), {}",
                    segments,
                    Utils::format_file_size(*size_bytes)
                );
                if !skipped.is_empty() {
                    println!("    Skipped: {:?}", skipped);
                }
            }
            VariantStatus::Failed { reason } => {
                println!("  ✗ {}: {}", outcome.variant, reason);
            }
        }
    }
}
