//! Static suggestion lookup keyed by operation category

use std::collections::HashMap;

/// Fixed mapping from category name to ordered suggestion strings.
///
/// Built once; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl SuggestionCatalog {
    /// The reference catalog: `rendering`, `data_processing`, `network_requests`
    pub fn builtin() -> Self {
        Self::from_entries([
            (
                "rendering",
                vec!["Use virtual DOM", "Implement component memoization"],
            ),
            (
                "data_processing",
                vec!["Use streaming for large datasets", "Implement lazy loading"],
            ),
            (
                "network_requests",
                vec!["Implement request batching", "Use connection pooling"],
            ),
        ])
    }

    pub fn from_entries<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(category, hints)| {
                    (category.into(), hints.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Suggestions for `category`, empty for unknown categories.
    pub fn suggestions_for(&self, category: &str) -> &[String] {
        self.entries
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SuggestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
