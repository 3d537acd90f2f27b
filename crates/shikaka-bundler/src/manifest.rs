//! Host project manifest (`package.json`) reading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ConfigurationError, Error, Result};

/// File name of the host project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the build cares about.
///
/// Missing `dependencies`/`peerDependencies` deserialize as empty maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// Parse manifest JSON text.
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| {
            ConfigurationError::ManifestInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Direct and peer dependency names, in manifest key order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
    }
}

/// Path of the manifest inside `root_dir`.
pub fn manifest_path(root_dir: &Path) -> PathBuf {
    root_dir.join(MANIFEST_FILE)
}

/// Read `<root_dir>/package.json`.
///
/// A missing manifest is a configuration error; any other read failure is a
/// filesystem error.
pub async fn read_manifest(root_dir: &Path) -> Result<PackageJson> {
    let path = manifest_path(root_dir);

    let source = match tokio::fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigurationError::ManifestNotFound(path).into());
        }
        Err(source) => return Err(Error::Filesystem { path, source }),
    };

    PackageJson::parse(&source, &path)
}
