//! Stylesheet compilation through lightningcss.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail};
use lightningcss::{
    bundler::{Bundler, FileProvider},
    css_modules::{Config as CssModulesConfig, CssModuleReference, Pattern},
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};

use crate::config::CssPluginOptions;

/// Stylesheet dialects recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetKind {
    Css,
    Scss,
    Less,
}

impl StylesheetKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "css" => Some(StylesheetKind::Css),
            "scss" => Some(StylesheetKind::Scss),
            "less" => Some(StylesheetKind::Less),
            _ => None,
        }
    }
}

/// Result of compiling one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledStylesheet {
    /// Printed CSS with scoped class names
    pub css: String,
    /// Local class name to scoped class name(s)
    pub exports: BTreeMap<String, String>,
}

impl CompiledStylesheet {
    /// JavaScript module standing in for the stylesheet import.
    ///
    /// ```text
    /// var styles = {"button":"Button__button"};
    /// export default styles;
    /// ```
    pub fn to_module(&self) -> anyhow::Result<String> {
        let map = serde_json::to_string(&self.exports)?;
        Ok(format!("var styles = {map};\nexport default styles;\n"))
    }
}

/// Name of the directory holding `path`, used for `[folder]`.
pub fn folder_name(path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read and compile the stylesheet at `path`.
///
/// CSS files are bundled first so `@import`ed rules are inlined and scoped
/// with the importing file. SCSS goes through grass, which resolves its own
/// imports. Less is rejected.
pub fn compile_file(path: &Path, options: &CssPluginOptions) -> anyhow::Result<CompiledStylesheet> {
    match StylesheetKind::from_path(path) {
        Some(StylesheetKind::Css) => bundle_stylesheet(path, options),
        Some(StylesheetKind::Scss) => {
            let css = grass::from_path(path, &grass::Options::default())
                .map_err(|e| anyhow!("Failed to compile SCSS from {}: {}", path.display(), e))?;
            compile_stylesheet(path, &css, options)
        }
        Some(StylesheetKind::Less) => bail!(
            "Unsupported stylesheet (Less is not supported): {}",
            path.display()
        ),
        None => bail!("Not a stylesheet: {}", path.display()),
    }
}

/// Parse, scope, optionally minify, and print a stylesheet held in memory.
///
/// `@import` rules are left as they are.
pub fn compile_stylesheet(
    path: &Path,
    source: &str,
    options: &CssPluginOptions,
) -> anyhow::Result<CompiledStylesheet> {
    let pattern_source = options.scoping.pattern_for(&folder_name(path));

    let stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: path.to_string_lossy().to_string(),
            css_modules: modules_config(pattern_source.as_deref())?,
            ..Default::default()
        },
    )
    .map_err(|e| anyhow!("Failed to parse CSS from {}: {}", path.display(), e))?;

    print(stylesheet, path, options)
}

fn bundle_stylesheet(path: &Path, options: &CssPluginOptions) -> anyhow::Result<CompiledStylesheet> {
    let pattern_source = options.scoping.pattern_for(&folder_name(path));
    let provider = FileProvider::new();
    let mut bundler = Bundler::new(
        &provider,
        None,
        ParserOptions {
            filename: path.to_string_lossy().to_string(),
            css_modules: modules_config(pattern_source.as_deref())?,
            ..Default::default()
        },
    );

    let stylesheet = bundler
        .bundle(path)
        .map_err(|e| anyhow!("Failed to bundle CSS from {}: {}", path.display(), e))?;

    print(stylesheet, path, options)
}

fn modules_config(template: Option<&str>) -> anyhow::Result<Option<CssModulesConfig>> {
    let Some(template) = template else {
        return Ok(None);
    };

    let pattern = Pattern::parse(template)
        .map_err(|e| anyhow!("Invalid CSS module naming template '{}': {}", template, e))?;
    Ok(Some(CssModulesConfig {
        pattern,
        ..Default::default()
    }))
}

fn print(
    mut stylesheet: StyleSheet<'_>,
    path: &Path,
    options: &CssPluginOptions,
) -> anyhow::Result<CompiledStylesheet> {
    if options.minify {
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| anyhow!("Failed to minify CSS from {}: {}", path.display(), e))?;
    }

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            ..Default::default()
        })
        .map_err(|e| anyhow!("Failed to print CSS from {}: {}", path.display(), e))?;

    let mut exports = BTreeMap::new();
    for (local, export) in result.exports.unwrap_or_default() {
        let mut names = vec![export.name];
        for composed in export.composes {
            match composed {
                CssModuleReference::Local { name } | CssModuleReference::Global { name } => {
                    names.push(name)
                }
                CssModuleReference::Dependency { .. } => {}
            }
        }
        exports.insert(local, names.join(" "));
    }

    Ok(CompiledStylesheet {
        css: result.code,
        exports,
    })
}
