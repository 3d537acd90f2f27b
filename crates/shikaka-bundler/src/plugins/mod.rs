//! Rolldown plugins for the pipeline stages.
//!
//! | Stage        | Plugin                                  |
//! |--------------|-----------------------------------------|
//! | `Replace`    | [`ReplacePlugin`] (transform hook)      |
//! | `Transpile`  | [`LanguagePlugin`] (load hook)          |
//! | `ExtractCss` | `ShikakaCssPlugin` (load + generate)    |
//! | `Interop`    | built into Rolldown                     |
//! | `Minify`     | Rolldown's minify option                |
//! | `Report`     | computed from the written artifacts     |
//!
//! [`ExternalPlugin`] is always installed first so dependency imports never
//! reach the loaders.

use std::sync::Arc;

use rolldown_plugin::__inner::SharedPluginable;
use shikaka_plugin_css::ShikakaCssPlugin;

use crate::assemble::BundlerInputSpec;
use crate::pipeline::Stage;

mod external;
mod language;
mod replace;

pub use external::ExternalPlugin;
pub use language::LanguagePlugin;
pub use replace::ReplacePlugin;

/// Plugins for `input`, in the order Rolldown must run them.
pub fn plugins_for(input: &BundlerInputSpec) -> Vec<SharedPluginable> {
    let mut plugins: Vec<SharedPluginable> =
        vec![Arc::new(ExternalPlugin::new(input.external.clone()))];

    for stage in input.pipeline.stages() {
        match stage {
            Stage::Replace(replacements) => {
                plugins.push(Arc::new(ReplacePlugin::new(replacements.clone())));
            }
            Stage::Transpile { language } => {
                plugins.push(Arc::new(LanguagePlugin::new(*language)));
            }
            Stage::ExtractCss(options) => {
                plugins.push(Arc::new(ShikakaCssPlugin::with_options(options.clone())));
            }
            Stage::Interop | Stage::Minify | Stage::Report => {}
        }
    }

    plugins
}
