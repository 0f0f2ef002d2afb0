//! Durable storage for cached translations.

mod error;
mod kv;
mod translation;

pub use error::StoreError;
pub use kv::{
    FileKeyValueStore,
    KeyValueStore,
    MemoryKeyValueStore,
    Write,
};
pub use translation::{
    ENGLISH_TRANSLATIONS_KEY,
    LAST_FETCH_TIME_KEY,
    TranslationBundle,
    TranslationStore,
    VIETNAMESE_TRANSLATIONS_KEY,
};
