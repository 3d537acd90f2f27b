//! Rolldown plugin for component stylesheets
//!
//! Intercepts `.css` and `.scss` imports in the `load` hook, runs them through
//! lightningcss (`@import` inlining, CSS module scoping, optional
//! minification), and hands Rolldown a small JavaScript module exporting the
//! class name map. SCSS is compiled with grass first. `.less` imports fail the
//! build with an "Unsupported stylesheet" error. The printed CSS is kept
//! aside and emitted as a single `styles.css` asset in `generate_bundle`.
//!
//! ```text
//! Button/index.module.css → load() → lightningcss → `var styles = {...}` (JS)
//!                                                 → styles.css (asset, first format only)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use shikaka_plugin_css::{CssPluginOptions, CssScoping, ShikakaCssPlugin};
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(ShikakaCssPlugin::with_options(
//!     CssPluginOptions::new().with_scoping(CssScoping::Local),
//! ));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rolldown_common::{ModuleType, Output, OutputAsset};
use rolldown_plugin::{
    HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput, HookLoadReturn, HookNoopReturn, Plugin,
    PluginContext,
};

mod compile;
mod config;

pub use compile::{
    CompiledStylesheet, StylesheetKind, compile_file, compile_stylesheet, folder_name,
};
pub use config::{CssPluginOptions, CssScoping, FOLDER_PLACEHOLDER, LOCAL_PATTERN};

/// Printed stylesheets collected during one build, keyed by module id.
///
/// Keys are sorted so the extracted stylesheet does not depend on load order.
#[derive(Debug, Clone, Default)]
pub struct StylesheetStore {
    sheets: Arc<Mutex<BTreeMap<String, String>>>,
}

impl StylesheetStore {
    pub fn insert(&self, id: impl Into<String>, css: String) {
        self.sheets.lock().insert(id.into(), css);
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.lock().is_empty()
    }

    /// All collected stylesheets joined into one document.
    pub fn concatenated(&self) -> String {
        let sheets = self.sheets.lock();
        let mut out = String::new();
        for css in sheets.values() {
            let css = css.trim_end();
            if css.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(css);
            out.push('\n');
        }
        out
    }
}

/// Rolldown plugin that scopes and extracts component stylesheets
#[derive(Debug, Clone)]
pub struct ShikakaCssPlugin {
    options: CssPluginOptions,
    store: StylesheetStore,
}

impl ShikakaCssPlugin {
    pub fn new() -> Self {
        Self::with_options(CssPluginOptions::default())
    }

    pub fn with_options(options: CssPluginOptions) -> Self {
        Self {
            options,
            store: StylesheetStore::default(),
        }
    }

    pub fn options(&self) -> &CssPluginOptions {
        &self.options
    }

    /// Stylesheets collected so far.
    pub fn store(&self) -> &StylesheetStore {
        &self.store
    }

    /// The asset to emit for the collected stylesheets, if any.
    pub fn extracted_asset(&self) -> Option<OutputAsset> {
        if !self.options.extract || self.store.is_empty() {
            return None;
        }

        Some(OutputAsset {
            names: vec![],
            original_file_names: vec![],
            filename: self.options.file_name.clone().into(),
            source: self.store.concatenated().into(),
        })
    }
}

impl Default for ShikakaCssPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stylesheet(id: &str) -> bool {
    StylesheetKind::from_path(Path::new(id)).is_some()
}

impl Plugin for ShikakaCssPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shikaka-css".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::Load | HookUsage::GenerateBundle
    }

    /// Replace stylesheet modules with their class name map.
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let options = self.options.clone();
        let store = self.store.clone();

        async move {
            if !is_stylesheet(&id) {
                return Ok(None);
            }

            let compiled = compile_file(Path::new(&id), &options)?;
            tracing::debug!(
                id = %id,
                classes = compiled.exports.len(),
                bytes = compiled.css.len(),
                "compiled stylesheet"
            );

            let module = compiled.to_module()?;
            store.insert(id, compiled.css);

            Ok(Some(HookLoadOutput {
                code: module.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }

    /// Emit the collected stylesheets as one asset.
    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let asset = self.extracted_asset();

        async move {
            if let Some(asset) = asset {
                args.bundle.push(Output::Asset(Arc::new(asset)));
            }
            Ok(())
        }
    }
}
