//! Error handling for the Shikaka CLI.
//!
//! The hierarchy mirrors how a build can go wrong:
//! - [`CliError`] is what commands return
//! - [`ConfigError`] covers option parsing and configuration layering
//! - [`BuildError`] covers CLI-level checks around a build
//! - library failures are carried as [`CliError::Bundler`]
//!
//! Every message that users can act on ends with a `Hint:` line.
//!
//! # Example
//!
//! ```rust,no_run
//! use shikaka_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_banner(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .context(format!("Failed to read banner '{}'", path.display()))
//! }
//! ```

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::{bundler_error_to_miette, cli_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Failure reported by the bundling library
    #[error(transparent)]
    Bundler(#[from] shikaka_bundler::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Whether the build driver already showed this error through the
    /// progress reporter.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Bundler(_))
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Errors raised by the CLI around a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Entry point is not a file: {}\n\nHint: Pass the library entry file, e.g. src/index.js", .0.display())]
    EntryNotAFile(PathBuf),

    #[error("Output directory would remove the project: {}\n\nHint: The output directory is deleted before every build, pick a dedicated folder such as 'dist'", .0.display())]
    UnsafeOutputDir(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
