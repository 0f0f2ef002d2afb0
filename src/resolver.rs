//! Display strings: cached values over compiled-in defaults.

use std::sync::Arc;

use crate::defaults::{
    default_string,
    default_table,
};
use crate::store::TranslationStore;
use crate::types::{
    LanguageCode,
    StringKey,
    StringTable,
};

/// Per-key merge: `cached[k]` when non-empty, otherwise `defaults[k]`.
#[must_use]
pub fn merge(cached: &StringTable, defaults: &StringTable) -> StringTable {
    StringTable::from_pairs(StringKey::ALL.iter().map(|key| {
        let value = cached.get(*key);
        (*key, if value.is_empty() { defaults.get(*key) } else { value })
    }))
}

/// Read model for presentation code.
///
/// Every table it returns is fully populated, whatever the state of the cache.
#[derive(Debug, Clone)]
pub struct StringResolver {
    /// Cached tables to merge over the defaults
    store: Arc<TranslationStore>,
}

impl StringResolver {
    #[must_use]
    pub const fn new(store: Arc<TranslationStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, language: LanguageCode) -> StringTable {
        let cached = self.store.get_cached(language).await;
        merge(&cached, default_table(language))
    }

    pub async fn resolve_key(&self, language: LanguageCode, key: StringKey) -> String {
        let cached = self.store.get_cached(language).await;
        match cached.get(key) {
            "" => default_string(language, key).to_string(),
            value => value.to_string(),
        }
    }
}
