//! Stylesheet processing configuration types

/// Placeholder replaced with the name of the directory holding the stylesheet.
pub const FOLDER_PLACEHOLDER: &str = "[folder]";

/// Naming pattern used when class names are scoped locally.
pub const LOCAL_PATTERN: &str = "[folder]__[local]";

/// How class names declared in a stylesheet are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CssScoping {
    /// Class names are passed through untouched.
    Off,

    /// Class names become `<folder>__<local>`, e.g. `Button__button`.
    #[default]
    Local,

    /// User supplied naming template.
    ///
    /// `[folder]` is substituted before the template reaches lightningcss,
    /// which understands `[name]`, `[local]`, `[hash]` and `[content-hash]`.
    Template(String),
}

impl CssScoping {
    /// The naming template for this mode, or `None` when scoping is off.
    pub fn template(&self) -> Option<&str> {
        match self {
            CssScoping::Off => None,
            CssScoping::Local => Some(LOCAL_PATTERN),
            CssScoping::Template(template) => Some(template.as_str()),
        }
    }

    /// Resolve the template for a stylesheet living in `folder`.
    pub fn pattern_for(&self, folder: &str) -> Option<String> {
        self.template()
            .map(|template| template.replace(FOLDER_PLACEHOLDER, folder))
    }
}

/// Configuration options for the stylesheet plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssPluginOptions {
    /// Class name scoping mode
    pub scoping: CssScoping,

    /// Emit the collected stylesheet as an asset
    ///
    /// Multi-format builds only extract during the first format so the
    /// stylesheet is written once.
    pub extract: bool,

    /// Enable CSS minification
    pub minify: bool,

    /// Name of the extracted stylesheet, relative to the output directory
    pub file_name: String,
}

impl Default for CssPluginOptions {
    fn default() -> Self {
        Self {
            scoping: CssScoping::Local,
            extract: true,
            minify: false,
            file_name: "styles.css".to_string(),
        }
    }
}

impl CssPluginOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoping mode
    pub fn with_scoping(mut self, scoping: CssScoping) -> Self {
        self.scoping = scoping;
        self
    }

    /// Enable or disable stylesheet extraction
    pub fn with_extract(mut self, extract: bool) -> Self {
        self.extract = extract;
        self
    }

    /// Enable minification
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_pattern_uses_folder() {
        assert_eq!(
            CssScoping::Local.pattern_for("Button").as_deref(),
            Some("Button__[local]")
        );
    }

    #[test]
    fn test_off_has_no_pattern() {
        assert_eq!(CssScoping::Off.pattern_for("Button"), None);
    }

    #[test]
    fn test_template_substitutes_every_folder() {
        let scoping = CssScoping::Template("[folder]-[local]-[folder]".to_string());
        assert_eq!(
            scoping.pattern_for("Modal").as_deref(),
            Some("Modal-[local]-Modal")
        );
    }

    #[test]
    fn test_builder_methods() {
        let options = CssPluginOptions::new()
            .with_scoping(CssScoping::Off)
            .with_extract(false)
            .with_minify(true);

        assert_eq!(options.scoping, CssScoping::Off);
        assert!(!options.extract);
        assert!(options.minify);
        assert_eq!(options.file_name, "styles.css");
    }
}
