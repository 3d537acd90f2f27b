//! Configuration for a Shikaka build.
//!
//! Values are layered with figment, lowest priority first:
//!
//! 1. built-in defaults ([`ShikakaConfig::default_config`])
//! 2. `shikaka.config.json` in the root directory, when present
//! 3. `SHIKAKA_*` environment variables (`SHIKAKA_OUT_DIR=build`)
//! 4. flags given on the command line
//!
//! The merged configuration is validated and turned into the immutable
//! [`shikaka_bundler::BuildRequest`] the driver consumes.

mod conversions;
mod loading;
mod validation;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

pub use loading::CONFIG_FILE_NAME;

/// Merged build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShikakaConfig {
    pub root_dir: PathBuf,

    pub out_dir: PathBuf,

    /// Requested formats in build order; names are checked when each one runs
    #[serde(deserialize_with = "one_or_many")]
    pub format: Vec<String>,

    #[serde(default)]
    pub minify: bool,

    #[serde(default)]
    pub sourcemap: bool,

    #[serde(default)]
    pub report: bool,

    #[serde(default)]
    pub css_modules: CssModules,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_config: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Literal replacements applied before transpilation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replace: BTreeMap<String, String>,
}

/// CSS module setting as written by the user.
///
/// `true`/`false` switch the default scoping on or off; any other string is
/// a naming template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssModules {
    Enabled(bool),
    Template(String),
}

impl Default for CssModules {
    fn default() -> Self {
        CssModules::Enabled(true)
    }
}

impl CssModules {
    /// Interpret the value of `--css-modules[=value]`.
    pub fn from_flag(value: &str) -> Self {
        match value {
            "true" => CssModules::Enabled(true),
            "false" => CssModules::Enabled(false),
            template => CssModules::Template(template.to_string()),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(format) => vec![format],
        OneOrMany::Many(formats) => formats,
    })
}
