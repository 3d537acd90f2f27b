//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::colors_enabled;

pub(crate) fn success_glyph() -> String {
    if colors_enabled() {
        "✓".green().bold().to_string()
    } else {
        "✓".to_string()
    }
}

pub(crate) fn error_glyph() -> String {
    if colors_enabled() {
        "✗".red().bold().to_string()
    } else {
        "✗".to_string()
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", success_glyph(), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", error_glyph(), message.red());
    } else {
        eprintln!("{} {}", error_glyph(), message);
    }
}
