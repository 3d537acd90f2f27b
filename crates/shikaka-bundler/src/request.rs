//! The immutable description of one build invocation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use shikaka_plugin_css::CssScoping;

use crate::discovery::LanguagePreference;

/// Default output format when none is requested.
pub const DEFAULT_FORMAT: &str = "es";

/// Everything one invocation was asked to do.
///
/// Formats are kept as the raw names the user typed; each one is parsed when
/// its turn in the format loop comes, so an unknown name only fails its own
/// iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Main entry, relative to `root_dir`
    pub entry_file: PathBuf,
    pub root_dir: PathBuf,
    pub out_dir: PathBuf,
    pub formats: Vec<String>,
    pub minify: bool,
    pub sourcemap: bool,
    pub report: bool,
    pub css_scoping: CssScoping,
    pub ts_config: Option<PathBuf>,
    pub banner: Option<String>,
    pub footer: Option<String>,
    pub replacements: BTreeMap<String, String>,
}

impl BuildRequest {
    /// Request with default options for `entry_file`.
    pub fn new(entry_file: impl Into<PathBuf>) -> Self {
        Self {
            entry_file: entry_file.into(),
            root_dir: PathBuf::from("."),
            out_dir: PathBuf::from("dist"),
            formats: vec![DEFAULT_FORMAT.to_string()],
            minify: false,
            sourcemap: false,
            report: false,
            css_scoping: CssScoping::Local,
            ts_config: None,
            banner: None,
            footer: None,
            replacements: BTreeMap::new(),
        }
    }

    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn sourcemap(mut self, sourcemap: bool) -> Self {
        self.sourcemap = sourcemap;
        self
    }

    pub fn report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    pub fn css_scoping(mut self, scoping: CssScoping) -> Self {
        self.css_scoping = scoping;
        self
    }

    pub fn ts_config(mut self, ts_config: impl Into<PathBuf>) -> Self {
        self.ts_config = Some(ts_config.into());
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn replace(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(key.into(), value.into());
        self
    }

    /// Whether outputs go into per-format sub-directories.
    pub fn is_multi_format(&self) -> bool {
        self.formats.len() > 1
    }

    pub fn language(&self) -> LanguagePreference {
        LanguagePreference::detect(&self.entry_file, self.ts_config.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = BuildRequest::new("src/index.js");

        assert_eq!(request.root_dir, PathBuf::from("."));
        assert_eq!(request.out_dir, PathBuf::from("dist"));
        assert_eq!(request.formats, vec!["es".to_string()]);
        assert_eq!(request.css_scoping, CssScoping::Local);
        assert!(!request.is_multi_format());
        assert_eq!(request.language(), LanguagePreference::JavaScript);
    }

    #[test]
    fn test_multi_format() {
        let request = BuildRequest::new("src/index.js").formats(["es", "cjs"]);
        assert!(request.is_multi_format());
    }

    #[test]
    fn test_duplicate_formats_count_as_multi() {
        let request = BuildRequest::new("src/index.js").formats(["es", "es"]);
        assert!(request.is_multi_format());
    }

    #[test]
    fn test_ts_config_switches_language() {
        let request = BuildRequest::new("src/index.js").ts_config("tsconfig.build.json");
        assert_eq!(request.language(), LanguagePreference::TypeScript);
    }
}
