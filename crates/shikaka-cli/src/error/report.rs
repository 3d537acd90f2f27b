//! Miette report conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use shikaka_bundler::{Error as BundlerError, ExtractedDiagnostic};

/// Convert a `CliError` into a report for the terminal.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => bundler_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a library error, listing every bundler diagnostic with its file.
pub fn bundler_error_to_miette(err: BundlerError) -> Report {
    if let BundlerError::Bundle {
        format,
        diagnostics,
    } = &err
    {
        if diagnostics.len() > 1 || diagnostics.iter().any(|d| d.file.is_some()) {
            let details = diagnostics
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join("\n");
            return miette::miette!("Build failed for format '{}':\n{}", format, details);
        }
    }

    Report::new(err)
}

fn describe(diag: &ExtractedDiagnostic) -> String {
    let mut line = match &diag.file {
        Some(file) => format!("  - {} in {}: {}", diag.kind, file, diag.message),
        None => format!("  - {}: {}", diag.kind, diag.message),
    };
    if let Some(help) = &diag.help {
        line.push_str(&format!("\n    Hint: {}", help));
    }
    line
}
