//! Shikaka CLI - multi-format builds for component libraries.
//!
//! This crate wraps [`shikaka_bundler`] in a command-line interface:
//!
//! - [`cli`] - argument definitions and `--replace.<KEY>` extraction
//! - [`config`] - configuration layering and validation
//! - [`commands`] - the build command
//! - [`error`] - error types with actionable messages
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - spinner, status messages and the size report
//!
//! # Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use shikaka_cli::{cli, commands, error::Result};
//!
//! # async fn run() -> Result<()> {
//! let (args, replacements) = cli::extract_replacements(std::env::args_os())?;
//! let cli = cli::Cli::parse_from(cli::join_switch_values(args));
//! let summary = commands::build_execute(&cli, &replacements).await?;
//! println!("{} format(s) built", summary.formats.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
