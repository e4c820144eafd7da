//! The ordered, duplicate-free set of framework directory prefixes.

use serde::Serialize;

/// Directory prefixes of every framework package, in discovery order.
///
/// Entries are unique, non-empty and end in a path separator; [`insert`]
/// enforces the first two and [`crate::utils::dir_prefix`] produces the third.
/// Order carries no meaning for membership tests but is kept so output is
/// deterministic.
///
/// [`insert`]: FrameworkPathSet::insert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameworkPathSet {
    entries: Vec<String>,
}

impl FrameworkPathSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `prefix` unless it is empty or already present.
    ///
    /// Returns `true` if the prefix was added.
    pub fn insert(&mut self, prefix: impl Into<String>) -> bool {
        let prefix = prefix.into();
        if prefix.is_empty() || self.contains(&prefix) {
            return false;
        }
        self.entries.push(prefix);
        true
    }

    /// Whether `prefix` is an entry of the set (exact match).
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.iter().any(|entry| entry == prefix)
    }

    /// Whether `resource` starts with any entry.
    #[must_use]
    pub fn matches(&self, resource: &str) -> bool {
        self.entries.iter().any(|entry| resource.starts_with(entry.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    /// Entries in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

impl<S: Into<String>> FromIterator<S> for FrameworkPathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for prefix in iter {
            set.insert(prefix);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FrameworkPathSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
