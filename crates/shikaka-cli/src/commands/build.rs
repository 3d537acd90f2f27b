//! The build command.
//!
//! # Build Process
//!
//! 1. Load and validate configuration (CLI > Env > File > Defaults)
//! 2. Check the entry path
//! 3. Run every requested format through Rolldown with a spinner attached
//! 4. Print the size report when `--report` is set

use crate::cli::{Cli, Replacements};
use crate::commands::utils;
use crate::config::ShikakaConfig;
use crate::error::Result;
use crate::ui;
use shikaka_bundler::{BuildRequest, BuildSummary, Reporter, RolldownBundler, run_build};

/// Execute the build command.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration
/// - A missing package manifest, root or entry
/// - The first format that fails to build
pub async fn execute(cli: &Cli, replacements: &Replacements) -> Result<BuildSummary> {
    let config = ShikakaConfig::load(cli, replacements)?;
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");

    utils::validate_entry(&config.root_dir.join(&cli.input))?;

    let request = config.to_request(&cli.input);
    if !cli.quiet {
        ui::info(&format!(
            "Building {} as {}",
            cli.input.display(),
            request.formats.join(", ")
        ));
    }

    let reporter = ui::SpinnerReporter::new();
    let summary = build(&request, &reporter).await?;

    if summary.components.is_empty() && !cli.quiet {
        ui::warning("No components found, only the main entry was bundled");
    }
    if request.report {
        ui::print_build_summary(&summary);
    }

    Ok(summary)
}

/// Run `request` with the Rolldown bundler.
pub async fn build(request: &BuildRequest, reporter: &dyn Reporter) -> Result<BuildSummary> {
    Ok(run_build(request, &RolldownBundler::new(), reporter).await?)
}
