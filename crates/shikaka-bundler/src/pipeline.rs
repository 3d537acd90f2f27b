//! The fixed transform pipeline.
//!
//! Every build runs the same stages in the same order; configuration only
//! decides which optional stages are present and how they are parameterized:
//!
//! ```text
//! Replace → Transpile → ExtractCss → Interop → [Minify] → [Report]
//! ```
//!
//! Replacement runs on the original source before any transpilation, and
//! minification is the last stage that rewrites code. `Report` only observes
//! the finished output.

use std::collections::BTreeMap;

use shikaka_plugin_css::CssPluginOptions;

use crate::discovery::LanguagePreference;
use crate::request::BuildRequest;

/// Marker replaced in every build.
pub const NODE_ENV_KEY: &str = "process.env.NODE_ENV";

/// Replacement for [`NODE_ENV_KEY`], a quoted string literal.
pub const NODE_ENV_PRODUCTION: &str = "\"production\"";

/// One pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Literal string substitution, applied in key order.
    Replace(BTreeMap<String, String>),

    /// TypeScript/TSX/JSX handling.
    ///
    /// Path mapping from `--ts-config` travels on the input spec as resolver
    /// aliases, see [`crate::tsconfig`].
    Transpile { language: LanguagePreference },

    /// Stylesheet scoping and extraction.
    ExtractCss(CssPluginOptions),

    /// CommonJS and JSON interop.
    Interop,

    /// Output minification.
    Minify,

    /// Output size report.
    Report,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Replace(_) => "replace",
            Stage::Transpile { .. } => "transpile",
            Stage::ExtractCss(_) => "extract-css",
            Stage::Interop => "interop",
            Stage::Minify => "minify",
            Stage::Report => "report",
        }
    }
}

/// Ordered stages for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Stages for `request`.
    ///
    /// `extract_css` is set for the first format only so the stylesheet is
    /// written once per invocation.
    pub fn for_request(request: &BuildRequest, extract_css: bool) -> Self {
        let mut replacements = BTreeMap::new();
        replacements.insert(NODE_ENV_KEY.to_string(), NODE_ENV_PRODUCTION.to_string());
        replacements.extend(request.replacements.clone());

        let mut stages = vec![
            Stage::Replace(replacements),
            Stage::Transpile {
                language: request.language(),
            },
            Stage::ExtractCss(
                CssPluginOptions::new()
                    .with_scoping(request.css_scoping.clone())
                    .with_extract(extract_css)
                    .with_minify(request.minify),
            ),
            Stage::Interop,
        ];

        if request.minify {
            stages.push(Stage::Minify);
        }
        if request.report {
            stages.push(Stage::Report);
        }

        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn css(&self) -> Option<&CssPluginOptions> {
        self.stages.iter().find_map(|stage| match stage {
            Stage::ExtractCss(options) => Some(options),
            _ => None,
        })
    }

    pub fn minify(&self) -> bool {
        self.stages.contains(&Stage::Minify)
    }

    pub fn report(&self) -> bool {
        self.stages.contains(&Stage::Report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shikaka_plugin_css::CssScoping;

    fn replacements(pipeline: &Pipeline) -> &BTreeMap<String, String> {
        pipeline
            .stages()
            .iter()
            .find_map(|stage| match stage {
                Stage::Replace(map) => Some(map),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_default_stages() {
        let pipeline = Pipeline::for_request(&BuildRequest::new("src/index.js"), true);

        assert_eq!(
            pipeline.names(),
            vec!["replace", "transpile", "extract-css", "interop"]
        );
        assert!(!pipeline.minify());
        assert!(!pipeline.report());
    }

    #[test]
    fn test_optional_stages_are_last() {
        let request = BuildRequest::new("src/index.js").minify(true).report(true);
        let pipeline = Pipeline::for_request(&request, true);

        assert_eq!(
            pipeline.names(),
            vec!["replace", "transpile", "extract-css", "interop", "minify", "report"]
        );
    }

    #[test]
    fn test_node_env_is_always_replaced() {
        let pipeline = Pipeline::for_request(&BuildRequest::new("src/index.js"), true);
        let replacements = replacements(&pipeline);

        assert_eq!(replacements[NODE_ENV_KEY], "\"production\"");
    }

    #[test]
    fn test_user_replacements_merge_and_override() {
        let request = BuildRequest::new("src/index.js")
            .replace("VERSION", "1.0.0")
            .replace(NODE_ENV_KEY, "\"development\"");
        let pipeline = Pipeline::for_request(&request, true);
        let replacements = replacements(&pipeline);

        assert_eq!(replacements["VERSION"], "1.0.0");
        assert_eq!(replacements[NODE_ENV_KEY], "\"development\"");
    }

    #[test]
    fn test_css_options_follow_request() {
        let request = BuildRequest::new("src/index.js")
            .css_scoping(CssScoping::Off)
            .minify(true);

        let first = Pipeline::for_request(&request, true);
        let later = Pipeline::for_request(&request, false);

        let css = first.css().unwrap();
        assert_eq!(css.scoping, CssScoping::Off);
        assert!(css.extract);
        assert!(css.minify);
        assert!(!later.css().unwrap().extract);
    }

    #[test]
    fn test_transpile_uses_detected_language() {
        let pipeline = Pipeline::for_request(&BuildRequest::new("src/index.tsx"), true);

        assert!(pipeline.stages().contains(&Stage::Transpile {
            language: LanguagePreference::TypeScript,
        }));
    }
}
