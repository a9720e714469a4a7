//! Generated documentation set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from output-relative path to markdown content.
///
/// Ordered so generated files are written (and reviewed) in the order the
/// generator produced them. May be empty. `README.md` and other bare
/// filenames route to fixed locations when the set is persisted; that
/// redirection is a naming convention handled by the writer, not a
/// property of this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentationSet(pub IndexMap<String, String>);

impl DocumentationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace content at a logical path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.0.insert(path.into(), content.into());
    }

    /// Look up content by logical path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Returns `true` if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (path, content) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for DocumentationSet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
