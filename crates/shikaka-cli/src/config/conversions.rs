//! Conversions between the command line, the merged configuration and the
//! library's build request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shikaka_bundler::{BuildRequest, CssScoping};

use crate::cli::{Cli, Replacements};
use crate::config::{CssModules, ShikakaConfig};

/// The subset of the configuration the user set explicitly on the command
/// line. Unset values are skipped so lower layers keep theirs.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sourcemap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    css_modules: Option<CssModules>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts_config: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    replace: BTreeMap<String, String>,
}

impl ShikakaConfig {
    pub(crate) fn overrides_from_cli(cli: &Cli, replacements: &Replacements) -> CliOverrides {
        let css_modules = if cli.no_css_modules {
            Some(CssModules::Enabled(false))
        } else {
            cli.css_modules.as_deref().map(CssModules::from_flag)
        };

        CliOverrides {
            root_dir: cli.root_dir.clone(),
            out_dir: cli.out_dir.clone(),
            format: (!cli.formats.is_empty()).then(|| cli.formats.clone()),
            minify: cli.minify.then_some(true),
            sourcemap: cli.sourcemap.then_some(true),
            report: cli.report.then_some(true),
            css_modules,
            ts_config: cli.ts_config.clone(),
            banner: cli.banner.clone(),
            footer: cli.footer.clone(),
            replace: replacements.clone(),
        }
    }

    /// Build request for bundling `input`.
    pub fn to_request(&self, input: &Path) -> BuildRequest {
        let mut request = BuildRequest::new(input)
            .root_dir(&self.root_dir)
            .out_dir(&self.out_dir)
            .formats(self.format.iter().cloned())
            .minify(self.minify)
            .sourcemap(self.sourcemap)
            .report(self.report)
            .css_scoping(self.css_modules.scoping());

        if let Some(ts_config) = &self.ts_config {
            request = request.ts_config(ts_config);
        }
        if let Some(banner) = &self.banner {
            request = request.banner(banner);
        }
        if let Some(footer) = &self.footer {
            request = request.footer(footer);
        }
        for (key, value) in &self.replace {
            request = request.replace(key, value);
        }

        request
    }
}

impl CssModules {
    pub fn scoping(&self) -> CssScoping {
        match self {
            CssModules::Enabled(true) => CssScoping::Local,
            CssModules::Enabled(false) => CssScoping::Off,
            CssModules::Template(template) => CssScoping::Template(template.clone()),
        }
    }
}
