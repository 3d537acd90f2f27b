//! # shikaka-bundler
//!
//! Multi-format component library builds on top of Rolldown.
//!
//! A library is laid out as one entry file plus a `components/` directory of
//! sibling sub-packages. This crate turns that layout into a multi-entry
//! Rolldown build:
//!
//! 1. [`discovery`] finds `components/*/index.{ts,tsx,js}` and builds the
//!    sorted [`InputMap`].
//! 2. [`external`] derives the prefix-match [`ExternalPredicate`] from the
//!    host `package.json`.
//! 3. [`assemble`] combines both with the [`BuildRequest`] into one input and
//!    one output description per format.
//! 4. [`driver`] runs the formats in order through a [`Bundler`] and writes
//!    the artifacts, stopping at the first failure.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shikaka_bundler::{BuildRequest, RolldownBundler, SilentReporter, run_build};
//!
//! # #[tokio::main]
//! # async fn main() -> shikaka_bundler::Result<()> {
//! let request = BuildRequest::new("src/index.js")
//!     .out_dir("dist")
//!     .formats(["es", "cjs"]);
//!
//! let summary = run_build(&request, &RolldownBundler::new(), &SilentReporter).await?;
//! for format in &summary.formats {
//!     println!("{}: {} files", format.format, format.files.len());
//! }
//! # Ok(()) }
//! ```

use std::path::PathBuf;

pub mod assemble;
pub mod bundler;
pub mod diagnostics;
pub mod discovery;
pub mod driver;
pub mod external;
pub mod format;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod plugins;
pub mod request;
pub mod tsconfig;

pub use assemble::{BundlerInputSpec, BundlerOutputSpec, assemble_config};
pub use bundler::{Artifact, ArtifactKind, Bundle, Bundler, RolldownBundler};
pub use diagnostics::{DiagnosticKind, ExtractedDiagnostic};
pub use discovery::{ComponentEntry, Discovery, InputMap, LanguagePreference, discover_entries};
pub use driver::{BuildSummary, FormatSummary, Reporter, SilentReporter, run_build};
pub use external::ExternalPredicate;
pub use format::ModuleFormat;
pub use manifest::{PackageJson, read_manifest};
pub use output::writer::WrittenFile;
pub use pipeline::{Pipeline, Stage};
pub use request::BuildRequest;
pub use tsconfig::{PathAliases, read_path_aliases};

pub use shikaka_plugin_css::CssScoping;

/// Problems with the host project detected before any format is built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No package.json found at '{}'", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Invalid package.json at '{}': {message}", .path.display())]
    ManifestInvalid { path: PathBuf, message: String },

    #[error("Entry file not found: '{}'", .0.display())]
    EntryNotFound(PathBuf),

    #[error("Root directory not found: '{}'", .0.display())]
    RootNotFound(PathBuf),

    #[error("TypeScript configuration not found: '{}'", .0.display())]
    TsConfigNotFound(PathBuf),

    #[error("Invalid TypeScript configuration at '{}': {message}", .path.display())]
    TsConfigInvalid { path: PathBuf, message: String },
}

/// Error types for shikaka-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A filesystem operation on `path` failed.
    #[error("Filesystem error at '{}': {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rolldown rejected the build for `format`.
    #[error("Build failed for format '{format}': {}", format_bundler_error(.diagnostics))]
    Bundle {
        format: String,
        diagnostics: Vec<ExtractedDiagnostic>,
    },

    #[error("Unknown output format '{0}' (expected one of: cjs | umd | es | iife)")]
    UnknownFormat(String),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),
}

/// Result type alias for shikaka-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundle error from a Rolldown error batch.
    pub fn from_rolldown_batch(format: impl Into<String>, error: &dyn std::fmt::Debug) -> Self {
        Error::Bundle {
            format: format.into(),
            diagnostics: diagnostics::extract_from_rolldown_error(error),
        }
    }
}

fn format_bundler_error(diagnostics: &[ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Filesystem { .. } => "FILESYSTEM_ERROR",
            Error::Bundle { .. } => "BUNDLE_ERROR",
            Error::UnknownFormat(_) => "UNKNOWN_FORMAT",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Configuration(ConfigurationError::ManifestNotFound(_)) => Some(Box::new(
                "Run the build from the package root or pass --root-dir.",
            )),
            Error::Configuration(ConfigurationError::ManifestInvalid { .. }) => {
                Some(Box::new("Check package.json for syntax errors."))
            }
            Error::Configuration(ConfigurationError::EntryNotFound(_)) => Some(Box::new(
                "The entry path is resolved relative to --root-dir.",
            )),
            Error::Configuration(ConfigurationError::TsConfigInvalid { .. }) => Some(Box::new(
                "Only compilerOptions.baseUrl and compilerOptions.paths are read.",
            )),
            Error::UnknownFormat(_) => {
                Some(Box::new("Pass --format with one of: cjs, umd, es, iife."))
            }
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' must stay inside the output directory.",
                path
            ))),
            Error::WriteFailure(_) => Some(Box::new("Check disk space and permissions.")),
            Error::Bundle { diagnostics, .. } => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                [] => None,
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details above.",
                )),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_single_diagnostic_message() {
        let err = Error::Bundle {
            format: "es".to_string(),
            diagnostics: vec![ExtractedDiagnostic::new(
                DiagnosticKind::UnresolvedImport,
                "Could not resolve './missing'",
            )],
        };

        assert_eq!(
            err.to_string(),
            "Build failed for format 'es': UnresolvedImport: Could not resolve './missing'"
        );
    }

    #[test]
    fn test_multiple_diagnostics_are_counted() {
        let err = Error::Bundle {
            format: "cjs".to_string(),
            diagnostics: vec![
                ExtractedDiagnostic::new(DiagnosticKind::ParseError, "a"),
                ExtractedDiagnostic::new(DiagnosticKind::ParseError, "b"),
            ],
        };

        assert!(err.to_string().contains("2 errors"));
        assert!(err.help().is_some());
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::UnknownFormat("amd".to_string());
        assert_eq!(err.code().unwrap().to_string(), "UNKNOWN_FORMAT");

        let err: Error = ConfigurationError::ManifestNotFound(PathBuf::from("package.json")).into();
        assert_eq!(err.code().unwrap().to_string(), "CONFIGURATION_ERROR");
        assert!(err.help().is_some());
    }
}
