//! JSX and TypeScript handling for project sources.
//!
//! Component libraries conventionally write JSX in plain `.js` files, which
//! Rolldown would otherwise parse as JavaScript. This plugin loads project
//! sources itself and tags them with the module type the transformer needs.
//! Anything under `node_modules` is left to Rolldown.

use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookUsage, Plugin, PluginContext,
};

use crate::discovery::LanguagePreference;

#[derive(Debug, Clone)]
pub struct LanguagePlugin {
    language: LanguagePreference,
}

impl LanguagePlugin {
    pub fn new(language: LanguagePreference) -> Self {
        Self { language }
    }

    /// Module type to load `id` as, or `None` to leave it to Rolldown.
    pub fn module_type_for(&self, id: &str) -> Option<ModuleType> {
        let path = Path::new(id);
        if path.components().any(|c| c.as_os_str() == "node_modules") {
            return None;
        }

        match (path.extension().and_then(|e| e.to_str())?, self.language) {
            ("js" | "jsx", _) => Some(ModuleType::Jsx),
            ("ts" | "mts" | "cts", LanguagePreference::TypeScript) => Some(ModuleType::Ts),
            ("tsx", LanguagePreference::TypeScript) => Some(ModuleType::Tsx),
            _ => None,
        }
    }
}

impl Plugin for LanguagePlugin {
    fn name(&self) -> Cow<'static, str> {
        "shikaka-language".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let module_type = self.module_type_for(&id);

        async move {
            let Some(module_type) = module_type else {
                return Ok(None);
            };

            let source = tokio::fs::read_to_string(&id)
                .await
                .with_context(|| format!("Failed to read source file: {}", id))?;

            Ok(Some(HookLoadOutput {
                code: source.into(),
                module_type: Some(module_type),
                ..Default::default()
            }))
        }
    }
}
