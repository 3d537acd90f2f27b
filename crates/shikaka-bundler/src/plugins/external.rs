//! Marks dependency imports as external.

use std::borrow::Cow;
use std::path::Path;

use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

use crate::external::ExternalPredicate;

/// Resolves every bare specifier accepted by the [`ExternalPredicate`] to an
/// external module, keeping the specifier as written.
#[derive(Debug, Clone)]
pub struct ExternalPlugin {
    predicate: ExternalPredicate,
}

impl ExternalPlugin {
    pub fn new(predicate: ExternalPredicate) -> Self {
        Self { predicate }
    }

    /// Whether an import of `specifier` is left to the consumer.
    ///
    /// Entries, relative and absolute specifiers always belong to the bundle.
    pub fn should_externalize(&self, specifier: &str, is_entry: bool) -> bool {
        if is_entry || specifier.starts_with('.') || Path::new(specifier).is_absolute() {
            return false;
        }
        self.predicate.is_external(specifier)
    }
}

impl Plugin for ExternalPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shikaka-externals".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let external = self.should_externalize(&specifier, args.importer.is_none());

        async move {
            if !external {
                return Ok(None);
            }

            tracing::trace!(%specifier, "external");
            Ok(Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            }))
        }
    }
}
