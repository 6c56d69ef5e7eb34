//! Localized message catalog contracts and adapters.

use std::collections::HashMap;

/// Host catalog of localized user-facing messages.
pub trait MessageCatalog {
    /// Returns the localized message for `key` when the catalog defines it.
    fn message(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Empty catalog for unsupported targets and baseline tests.
pub struct NoopCatalog;

impl MessageCatalog for NoopCatalog {
    fn message(&self, _key: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Default)]
/// Catalog backed by a fixed in-memory message table.
pub struct StaticCatalog {
    messages: HashMap<String, String>,
}

impl StaticCatalog {
    /// Builds a catalog from `(key, message)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            messages: pairs
                .iter()
                .map(|(key, message)| ((*key).to_string(), (*message).to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog for StaticCatalog {
    fn message(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}

/// Resolves a localized message, substituting `fallback` when `key` is undefined.
pub fn localize<C: MessageCatalog + ?Sized>(catalog: &C, key: &str, fallback: &str) -> String {
    catalog.message(key).unwrap_or_else(|| fallback.to_string())
}
