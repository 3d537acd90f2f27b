//! Formatting utilities for sizes, durations, and the build report.

use std::fmt::Write as _;
use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;
use shikaka_bundler::BuildSummary;

use super::colors_enabled;

/// Format file size in human-readable format.
///
/// ```
/// use shikaka_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use shikaka_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the size report of a finished build to stderr.
pub fn print_build_summary(summary: &BuildSummary) {
    let width = Term::stderr().size().1 as usize;
    eprint!("{}", render_build_summary(summary, width.clamp(20, 80), colors_enabled()));
}

fn render_build_summary(summary: &BuildSummary, width: usize, colored: bool) -> String {
    let rule = "─".repeat(width);
    let mut out = String::new();

    let title = "Bundle Report";
    if colored {
        let _ = writeln!(out, "\n{}", title.bold().underline());
    } else {
        let _ = writeln!(out, "\n{}", title);
    }
    let _ = writeln!(out, "{}", rule);

    for format in &summary.formats {
        let header = format!(
            "{} ({}, {})",
            format.format,
            format_size(format.total_size()),
            format_duration(format.elapsed)
        );
        if colored {
            let _ = writeln!(out, "{}", header.bold());
        } else {
            let _ = writeln!(out, "{}", header);
        }

        for file in &format.files {
            let marker = if file.is_entry { "▸" } else { " " };
            let size = format_size(file.size);
            if colored {
                let _ = writeln!(
                    out,
                    "  {} {} {}",
                    marker.blue(),
                    file.filename.bright_white(),
                    size.dimmed()
                );
            } else {
                let _ = writeln!(out, "  {} {} {}", marker, file.filename, size);
            }
        }
    }

    let _ = writeln!(out, "{}", rule);
    let total = format!(
        "{} in {}",
        format_size(summary.total_size()),
        format_duration(summary.elapsed)
    );
    if colored {
        let _ = writeln!(out, "  {} {}", "Total:".bold(), total.green());
    } else {
        let _ = writeln!(out, "  Total: {}", total);
    }

    out
}
