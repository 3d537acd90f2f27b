//! Logging for the Shikaka CLI.
//!
//! Library crates emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use shikaka_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "shikaka=debug,shikaka_bundler=debug,shikaka_cli=debug,shikaka_plugin_css=debug";
const QUIET_FILTER: &str = "shikaka=error,shikaka_bundler=error,shikaka_cli=error,shikaka_plugin_css=error";
const DEFAULT_FILTER: &str =
    "shikaka=info,shikaka_bundler=info,shikaka_cli=info,shikaka_plugin_css=info";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for the shikaka crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for the shikaka crates
///
/// Must be called at most once per process.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_ansi(!no_color)
                .compact(),
        )
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        for filter in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(filter).is_ok(), "{filter}");
        }
    }

    #[test]
    fn test_verbose_takes_precedence() {
        let filter = filter_for(true, false).to_string();
        assert!(filter.contains("shikaka_bundler=debug"));

        let filter = filter_for(false, true).to_string();
        assert!(filter.contains("shikaka_bundler=error"));
    }
}
