//! Spinner that follows the format loop.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use shikaka_bundler::Reporter;

use super::messages::{error_glyph, success_glyph};

/// [`Reporter`] drawing an indicatif spinner on stderr.
///
/// When stderr is not a terminal indicatif draws nothing, so the final
/// success or failure line is printed directly instead.
///
/// ```no_run
/// use shikaka_bundler::Reporter;
/// use shikaka_cli::ui::SpinnerReporter;
///
/// let spinner = SpinnerReporter::new();
/// spinner.start("Bundling");
/// spinner.update("Bundle for 'es'");
/// spinner.succeed("Built 1 format(s) in 120ms");
/// ```
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);

        Self { pb }
    }

    fn finish(&self, line: String) {
        if self.pb.is_hidden() {
            eprintln!("{}", line);
        }
        self.pb.finish_with_message(line);
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SpinnerReporter {
    fn start(&self, message: &str) {
        self.pb.set_message(message.to_string());
        self.pb.enable_steady_tick(Duration::from_millis(100));
    }

    fn update(&self, message: &str) {
        tracing::debug!("{}", message);
        self.pb.set_message(message.to_string());
    }

    fn succeed(&self, message: &str) {
        self.finish(format!("{} {}", success_glyph(), message));
    }

    fn fail(&self, message: &str) {
        self.finish(format!("{} {}", error_glyph(), message));
    }
}
