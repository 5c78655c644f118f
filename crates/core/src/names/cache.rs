//! Previously used participant names, for autocomplete.

use serde::{Deserialize, Serialize};

/// Default number of suggestions offered for a prefix.
pub const DEFAULT_SUGGESTIONS: usize = 4;

/// Insertion-ordered set of names seen in earlier sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameCache {
    names: Vec<String>,
}

impl NameCache {
    /// Builds a cache from stored names, dropping repeats and blanks.
    #[must_use]
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut cache = Self::default();
        cache.remember(names);
        cache
    }

    /// Merges `names` into the cache. Returns how many were new.
    pub fn remember<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.names.len();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !self.contains(name) {
                self.names.push(name.to_string());
            }
        }
        self.names.len() - before
    }

    /// Cached names starting with `prefix`, ignoring case, that are not in
    /// `exclude`. An empty prefix suggests nothing.
    #[must_use]
    pub fn suggest<S: AsRef<str>>(&self, prefix: &str, exclude: &[S], limit: usize) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .filter(|name| !exclude.iter().any(|ex| ex.as_ref() == name.as_str()))
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    /// Returns true if `name` is cached (case-sensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Cached names, oldest first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of cached names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
