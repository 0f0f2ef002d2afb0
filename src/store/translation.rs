//! Persisted translation bundle.

use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};
use tokio::sync::{
    Mutex,
    watch,
};

use super::{
    KeyValueStore,
    StoreError,
    Write,
};
use crate::types::{
    LanguageCode,
    StringTable,
};

pub const ENGLISH_TRANSLATIONS_KEY: &str = "english_translations";
pub const VIETNAMESE_TRANSLATIONS_KEY: &str = "vietnamese_translations";
pub const LAST_FETCH_TIME_KEY: &str = "last_fetch_time";

/// Storage key holding the table for `language`.
const fn table_key(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::En => ENGLISH_TRANSLATIONS_KEY,
        LanguageCode::Vn => VIETNAMESE_TRANSLATIONS_KEY,
    }
}

/// Both cached tables plus the time they were written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBundle {
    pub en: StringTable,
    pub vn: StringTable,
    /// Epoch milliseconds of the last commit; `0` when never fetched.
    pub last_fetch_timestamp: i64,
}

impl TranslationBundle {
    #[must_use]
    pub const fn table(&self, language: LanguageCode) -> &StringTable {
        match language {
            LanguageCode::En => &self.en,
            LanguageCode::Vn => &self.vn,
        }
    }

    pub const fn table_mut(&mut self, language: LanguageCode) -> &mut StringTable {
        match language {
            LanguageCode::En => &mut self.en,
            LanguageCode::Vn => &mut self.vn,
        }
    }
}

/// Sole owner and writer of the persisted [`TranslationBundle`].
///
/// Reads never fail: storage errors are logged and reported as the empty
/// state. Writes go through one mutex, so the two tables and the timestamp
/// always change together.
#[derive(Debug)]
pub struct TranslationStore {
    /// Backing key-value store
    kv: Arc<dyn KeyValueStore>,
    /// Single-writer critical section for commits
    write_lock: Mutex<()>,
    /// Publishes the timestamp of each commit or clear
    changes: watch::Sender<i64>,
}

impl TranslationStore {
    /// Opens the store, seeding the change feed with the persisted timestamp.
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let (changes, _) = watch::channel(0);
        let store = Self { kv, write_lock: Mutex::new(()), changes };
        let timestamp = store.last_fetch_timestamp().await;
        store.changes.send_replace(timestamp);
        store
    }

    /// Last cached table for `language`; all-empty if nothing usable is stored.
    pub async fn get_cached(&self, language: LanguageCode) -> StringTable {
        match self.read_table(language).await {
            Ok(table) => table,
            Err(error) => {
                tracing::warn!(%language, %error, "Cached translations unreadable, using empty table");
                StringTable::new()
            }
        }
    }

    /// Persisted fetch time in epoch milliseconds, or `0`.
    pub async fn last_fetch_timestamp(&self) -> i64 {
        match self.read_timestamp().await {
            Ok(timestamp) => timestamp,
            Err(error) => {
                tracing::warn!(%error, "Last fetch time unreadable, treating cache as never fetched");
                0
            }
        }
    }

    /// Consistent snapshot of the whole bundle.
    pub async fn bundle(&self) -> TranslationBundle {
        let _guard = self.write_lock.lock().await;
        self.read_bundle().await
    }

    /// Atomically replaces both tables and the timestamp.
    pub async fn commit(
        &self,
        en: &StringTable,
        vn: &StringTable,
        timestamp: i64,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_locked(en, vn, timestamp).await
    }

    /// Read-modify-write under the commit lock.
    ///
    /// `update` sees the current bundle; whatever it leaves in the tables is
    /// committed with `timestamp`. Returns the committed bundle. Fails without
    /// writing if either stored table cannot be read.
    pub async fn update_with<F>(&self, timestamp: i64, update: F) -> Result<TranslationBundle, StoreError>
    where
        F: FnOnce(&mut TranslationBundle) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut bundle = TranslationBundle {
            en: self.read_table(LanguageCode::En).await?,
            vn: self.read_table(LanguageCode::Vn).await?,
            last_fetch_timestamp: timestamp,
        };
        update(&mut bundle);
        bundle.last_fetch_timestamp = timestamp;

        self.write_locked(&bundle.en, &bundle.vn, timestamp).await?;
        Ok(bundle)
    }

    /// Resets both tables to empty and the timestamp to `0`.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        self.kv
            .write_batch(vec![
                Write::delete(ENGLISH_TRANSLATIONS_KEY),
                Write::delete(VIETNAMESE_TRANSLATIONS_KEY),
                Write::delete(LAST_FETCH_TIME_KEY),
            ])
            .await?;
        self.changes.send_replace(0);

        tracing::info!("Cleared cached translations");
        Ok(())
    }

    /// Receiver that observes the timestamp after every commit or clear.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.changes.subscribe()
    }

    /// Writes a full bundle. Caller must hold `write_lock`.
    async fn write_locked(
        &self,
        en: &StringTable,
        vn: &StringTable,
        timestamp: i64,
    ) -> Result<(), StoreError> {
        let writes = vec![
            Write::put(ENGLISH_TRANSLATIONS_KEY, serde_json::to_string(en)?),
            Write::put(VIETNAMESE_TRANSLATIONS_KEY, serde_json::to_string(vn)?),
            Write::put(LAST_FETCH_TIME_KEY, timestamp.to_string()),
        ];
        self.kv.write_batch(writes).await?;
        self.changes.send_replace(timestamp);

        tracing::info!(timestamp, "Committed translations");
        Ok(())
    }

    /// Reads all three values, absorbing storage errors.
    async fn read_bundle(&self) -> TranslationBundle {
        TranslationBundle {
            en: self.get_cached(LanguageCode::En).await,
            vn: self.get_cached(LanguageCode::Vn).await,
            last_fetch_timestamp: self.last_fetch_timestamp().await,
        }
    }

    /// Decodes the stored table for `language`.
    async fn read_table(&self, language: LanguageCode) -> Result<StringTable, StoreError> {
        match self.kv.get(table_key(language)).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(StringTable::new()),
        }
    }

    /// Parses `last_fetch_time`.
    async fn read_timestamp(&self) -> Result<i64, StoreError> {
        match self.kv.get(LAST_FETCH_TIME_KEY).await? {
            Some(raw) => raw.trim().parse().map_err(|_| StoreError::InvalidTimestamp(raw)),
            None => Ok(0),
        }
    }
}
