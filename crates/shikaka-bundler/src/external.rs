//! External dependency predicate.
//!
//! Every import whose specifier starts with a declared dependency name is left
//! to the consumer. The match is a plain prefix test: `react` covers
//! `react/jsx-runtime` and also `react-dom`, which is why peer dependencies
//! such as `react-dom` do not need to be listed separately when `react` is.

use crate::manifest::PackageJson;

/// Prefix-match predicate over declared dependency names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalPredicate {
    names: Vec<String>,
}

impl ExternalPredicate {
    /// Build the predicate from the union of direct and peer dependencies.
    pub fn from_manifest(manifest: &PackageJson) -> Self {
        Self::from_names(manifest.dependency_names())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Whether `specifier` must stay out of the bundle.
    pub fn is_external(&self, specifier: &str) -> bool {
        self.names.iter().any(|name| specifier.starts_with(name.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
