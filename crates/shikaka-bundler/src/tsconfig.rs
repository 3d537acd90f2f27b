//! Path mapping from a TypeScript configuration file.
//!
//! Only `compilerOptions.baseUrl` and `compilerOptions.paths` are read. Each
//! `paths` pattern becomes a resolver alias:
//!
//! ```text
//! "@ui/*": ["src/components/*"]  →  "@ui" → <baseUrl>/src/components
//! ```
//!
//! The file is parsed as JSON5, so comments and trailing commas are fine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Deserialize;

use crate::{ConfigurationError, Error, Result};

/// Alias prefix to candidate targets, tried in order.
pub type PathAliases = BTreeMap<String, Vec<PathBuf>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<PathBuf>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// Read the `paths` mapping of the TypeScript configuration at `path`.
///
/// Targets are resolved against `baseUrl`, itself relative to the directory
/// holding the configuration file.
pub async fn read_path_aliases(path: &Path) -> Result<PathAliases> {
    let source = match tokio::fs::read_to_string(path).await {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigurationError::TsConfigNotFound(path.to_path_buf()).into());
        }
        Err(source) => {
            return Err(Error::Filesystem {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let aliases = parse_path_aliases(path, &source)?;
    tracing::debug!(path = %path.display(), aliases = ?aliases, "read TypeScript path mapping");
    Ok(aliases)
}

fn parse_path_aliases(path: &Path, source: &str) -> Result<PathAliases> {
    let config: TsConfigFile =
        json5::from_str(source).map_err(|e| ConfigurationError::TsConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let base = config_dir.join(
        config
            .compiler_options
            .base_url
            .unwrap_or_else(|| PathBuf::from(".")),
    );

    let mut aliases = PathAliases::new();
    for (pattern, targets) in config.compiler_options.paths {
        let key = strip_wildcard(&pattern);
        if key.is_empty() {
            tracing::warn!(pattern = %pattern, "ignoring catch-all path mapping");
            continue;
        }

        let targets: Vec<PathBuf> = targets
            .iter()
            .map(|target| base.join(strip_wildcard(target)).clean())
            .collect();
        if !targets.is_empty() {
            aliases.insert(key.to_string(), targets);
        }
    }

    Ok(aliases)
}

fn strip_wildcard(pattern: &str) -> &str {
    pattern
        .strip_suffix("/*")
        .or_else(|| pattern.strip_suffix('*'))
        .unwrap_or(pattern)
}
