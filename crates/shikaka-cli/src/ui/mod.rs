//! Terminal output: status glyphs, the build spinner and the size report.
//!
//! Everything is written to stderr. Colors are decided once by
//! [`init_colors`] and respected by every helper here.
//!
//! ```no_run
//! use shikaka_cli::ui;
//!
//! ui::init_colors(false);
//! let spinner = ui::SpinnerReporter::new();
//! ui::success("Build complete");
//! ```

mod format;
mod messages;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{error, info, success, warning};
pub use spinner::SpinnerReporter;

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether
/// stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide color support for the rest of the process.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
