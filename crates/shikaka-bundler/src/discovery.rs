//! Component entry discovery.
//!
//! A component library is laid out as one main entry file plus a
//! `components/` directory next to it, where every sub-directory holding an
//! `index.*` file is a component:
//!
//! ```text
//! src/
//! ├── index.js            → "index"
//! └── components/
//!     ├── Button/index.js → "Button"
//!     ├── Footer/index.tsx → "Footer" (TypeScript preference only)
//!     └── helpers/        → skipped, no index file
//! ```
//!
//! Child directories are checked concurrently; the resulting [`InputMap`] is
//! sorted by name so it never depends on listing or completion order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

use crate::{Error, Result};

/// Reserved input name for the main entry file.
pub const INDEX_ENTRY: &str = "index";

/// Name of the directory holding component sub-directories.
pub const COMPONENTS_DIR: &str = "components";

/// Which entry file names are tried inside a component directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePreference {
    /// `index.js` only.
    #[default]
    JavaScript,
    /// `index.ts`, then `index.tsx`, then `index.js`.
    TypeScript,
}

impl LanguagePreference {
    /// TypeScript when the main entry is a TypeScript file or a tsconfig is given.
    pub fn detect(entry_file: &Path, ts_config: Option<&Path>) -> Self {
        let is_ts_entry = entry_file
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "ts" | "tsx" | "mts" | "cts"));

        if is_ts_entry || ts_config.is_some() {
            LanguagePreference::TypeScript
        } else {
            LanguagePreference::JavaScript
        }
    }

    /// Candidate entry file names, highest priority first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            LanguagePreference::JavaScript => &["index.js"],
            LanguagePreference::TypeScript => &["index.ts", "index.tsx", "index.js"],
        }
    }
}

/// A discovered component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    /// Directory base name
    pub name: String,
    /// Resolved entry file
    pub entry_path: PathBuf,
}

/// Ordered mapping from input name to entry file.
///
/// Always contains [`INDEX_ENTRY`] bound to the main entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMap {
    entries: BTreeMap<String, PathBuf>,
}

impl InputMap {
    /// A map holding only the main entry.
    pub fn new(main_entry: impl Into<PathBuf>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(INDEX_ENTRY.to_string(), main_entry.into());
        Self { entries }
    }

    /// Build the map from discovered components.
    ///
    /// The main entry is inserted last so a component named `index` can never
    /// replace it.
    pub fn from_components(main_entry: impl Into<PathBuf>, components: &[ComponentEntry]) -> Self {
        let mut entries: BTreeMap<String, PathBuf> = components
            .iter()
            .map(|c| (c.name.clone(), c.entry_path.clone()))
            .collect();
        entries.insert(INDEX_ENTRY.to_string(), main_entry.into());
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// The main entry file.
    pub fn main_entry(&self) -> &Path {
        // `new` and `from_components` both insert the index key
        self.entries
            .get(INDEX_ENTRY)
            .map(PathBuf::as_path)
            .unwrap_or(Path::new(""))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything discovery found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub inputs: InputMap,
    /// Components sorted by name, including any shadowed `index` component
    pub components: Vec<ComponentEntry>,
}

/// Directory expected to hold the components for `entry_file`.
pub fn components_dir(root_dir: &Path, entry_file: &Path) -> PathBuf {
    let entry_dir = entry_file.parent().unwrap_or(Path::new(""));
    root_dir.join(entry_dir).join(COMPONENTS_DIR)
}

/// Discover the main entry plus every component next to it.
///
/// `entry_file` is relative to `root_dir` (absolute paths are kept as is).
pub async fn discover_entries(
    root_dir: &Path,
    entry_file: &Path,
    language: LanguagePreference,
) -> Result<Discovery> {
    let main_entry = root_dir.join(entry_file);
    let components_path = components_dir(root_dir, entry_file);

    if !path_exists(&components_path).await? {
        tracing::debug!(path = %components_path.display(), "no components directory");
        return Ok(Discovery {
            inputs: InputMap::new(main_entry),
            components: Vec::new(),
        });
    }

    let mut read_dir = tokio::fs::read_dir(&components_path)
        .await
        .map_err(|source| Error::Filesystem {
            path: components_path.clone(),
            source,
        })?;

    let mut lookups = JoinSet::new();
    loop {
        let child = read_dir.next_entry().await.map_err(|source| Error::Filesystem {
            path: components_path.clone(),
            source,
        })?;
        let Some(child) = child else { break };

        let Ok(name) = child.file_name().into_string() else {
            tracing::warn!(
                path = %child.path().display(),
                "skipping component directory with a non UTF-8 name"
            );
            continue;
        };

        let dir = child.path();
        lookups.spawn(async move { find_component(name, dir, language).await });
    }

    let mut found = BTreeMap::new();
    while let Some(joined) = lookups.join_next().await {
        let entry = joined.map_err(|e| Error::Filesystem {
            path: components_path.clone(),
            source: std::io::Error::other(format!("component lookup panicked: {e}")),
        })?;

        if let Some(component) = entry? {
            found.insert(component.name.clone(), component);
        }
    }

    let components: Vec<ComponentEntry> = found.into_values().collect();

    if components.iter().any(|c| c.name == INDEX_ENTRY) {
        tracing::warn!(
            "component directory '{}/{}' is shadowed by the main entry",
            components_path.display(),
            INDEX_ENTRY
        );
    }

    Ok(Discovery {
        inputs: InputMap::from_components(main_entry, &components),
        components,
    })
}

/// Resolve the entry file of one child of `components/`.
async fn find_component(
    name: String,
    dir: PathBuf,
    language: LanguagePreference,
) -> Result<Option<ComponentEntry>> {
    let metadata = tokio::fs::metadata(&dir)
        .await
        .map_err(|source| Error::Filesystem {
            path: dir.clone(),
            source,
        })?;

    if !metadata.is_dir() {
        return Ok(None);
    }

    for candidate in language.candidates() {
        let entry_path = dir.join(candidate);
        if path_exists(&entry_path).await? {
            return Ok(Some(ComponentEntry { name, entry_path }));
        }
    }

    tracing::debug!(component = %name, "no entry file, skipping");
    Ok(None)
}

async fn path_exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|source| Error::Filesystem {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default 1;\n").unwrap();
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(
            LanguagePreference::detect(Path::new("src/index.ts"), None),
            LanguagePreference::TypeScript
        );
        assert_eq!(
            LanguagePreference::detect(Path::new("src/index.tsx"), None),
            LanguagePreference::TypeScript
        );
        assert_eq!(
            LanguagePreference::detect(Path::new("src/index.js"), None),
            LanguagePreference::JavaScript
        );
        assert_eq!(
            LanguagePreference::detect(Path::new("src/index.js"), Some(Path::new("tsconfig.json"))),
            LanguagePreference::TypeScript
        );
    }

    #[test]
    fn test_components_dir_is_relative_to_root() {
        assert_eq!(
            components_dir(Path::new("/lib"), Path::new("src/index.js")),
            PathBuf::from("/lib/src/components")
        );
        assert_eq!(
            components_dir(Path::new("/lib"), Path::new("index.js")),
            PathBuf::from("/lib/components")
        );
    }

    #[tokio::test]
    async fn test_no_components_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.js");

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.js"),
            LanguagePreference::JavaScript,
        )
        .await
        .unwrap();

        assert_eq!(discovery.inputs.len(), 1);
        assert_eq!(
            discovery.inputs.get(INDEX_ENTRY),
            Some(temp.path().join("src/index.js").as_path())
        );
        assert!(discovery.components.is_empty());
    }

    #[tokio::test]
    async fn test_empty_components_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.js");
        fs::create_dir_all(temp.path().join("src/components")).unwrap();

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.js"),
            LanguagePreference::JavaScript,
        )
        .await
        .unwrap();

        assert_eq!(discovery.inputs.names().collect::<Vec<_>>(), vec![INDEX_ENTRY]);
    }

    #[tokio::test]
    async fn test_discovers_sorted_components() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.js");
        touch(temp.path(), "src/components/Modal/index.js");
        touch(temp.path(), "src/components/Button/index.js");
        touch(temp.path(), "src/components/Footer/index.js");
        // Plain files and empty directories are not components
        touch(temp.path(), "src/components/README.md");
        fs::create_dir_all(temp.path().join("src/components/helpers")).unwrap();

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.js"),
            LanguagePreference::JavaScript,
        )
        .await
        .unwrap();

        assert_eq!(
            discovery.inputs.names().collect::<Vec<_>>(),
            vec!["Button", "Footer", "Modal", "index"]
        );
        assert_eq!(
            discovery.inputs.get("Button"),
            Some(temp.path().join("src/components/Button/index.js").as_path())
        );
        let names: Vec<_> = discovery.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Button", "Footer", "Modal"]);
    }

    #[tokio::test]
    async fn test_javascript_preference_ignores_typescript() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.js");
        touch(temp.path(), "src/components/Button/index.tsx");

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.js"),
            LanguagePreference::JavaScript,
        )
        .await
        .unwrap();

        assert!(discovery.inputs.get("Button").is_none());
    }

    #[tokio::test]
    async fn test_typescript_priority() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");
        touch(temp.path(), "src/components/Button/index.tsx");
        touch(temp.path(), "src/components/Card/index.ts");
        touch(temp.path(), "src/components/Card/index.tsx");
        touch(temp.path(), "src/components/Legacy/index.js");

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.ts"),
            LanguagePreference::TypeScript,
        )
        .await
        .unwrap();

        let components = temp.path().join("src/components");
        assert_eq!(
            discovery.inputs.get("Button"),
            Some(components.join("Button/index.tsx").as_path())
        );
        assert_eq!(
            discovery.inputs.get("Card"),
            Some(components.join("Card/index.ts").as_path())
        );
        assert_eq!(
            discovery.inputs.get("Legacy"),
            Some(components.join("Legacy/index.js").as_path())
        );
    }

    #[tokio::test]
    async fn test_index_component_never_overrides_main_entry() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.js");
        touch(temp.path(), "src/components/index/index.js");
        touch(temp.path(), "src/components/Button/index.js");

        let discovery = discover_entries(
            temp.path(),
            Path::new("src/index.js"),
            LanguagePreference::JavaScript,
        )
        .await
        .unwrap();

        assert_eq!(discovery.inputs.len(), 2);
        assert_eq!(
            discovery.inputs.main_entry(),
            temp.path().join("src/index.js").as_path()
        );
        assert!(discovery.components.iter().any(|c| c.name == INDEX_ENTRY));
    }

    #[test]
    fn test_input_map_from_components_is_order_independent() {
        let a = ComponentEntry {
            name: "Alpha".to_string(),
            entry_path: PathBuf::from("/c/Alpha/index.js"),
        };
        let z = ComponentEntry {
            name: "Zeta".to_string(),
            entry_path: PathBuf::from("/c/Zeta/index.js"),
        };

        let forward = InputMap::from_components("/src/index.js", &[a.clone(), z.clone()]);
        let backward = InputMap::from_components("/src/index.js", &[z, a]);

        assert_eq!(forward, backward);
        assert_eq!(
            forward.names().collect::<Vec<_>>(),
            vec!["Alpha", "Zeta", "index"]
        );
    }
}
