//! Refresh orchestration: staleness gate, fetch, commit.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::fetcher::{
    FetchError,
    TranslationSource,
};
use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::types::StringTable;

/// Cached data younger than this is served without touching the network.
pub const CACHE_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// `true` when the cache was never filled or is older than [`CACHE_DURATION_MS`].
#[must_use]
pub const fn is_stale(last_fetch_timestamp: i64, now: i64) -> bool {
    last_fetch_timestamp == 0 || now.saturating_sub(last_fetch_timestamp) > CACHE_DURATION_MS
}

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Fetched translations could not be stored: {0}")]
    Store(#[from] StoreError),
}

/// Successful result of [`TranslationCacheController::ensure_fresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cache was fresh; nothing was fetched.
    CacheHit,
    /// A fetch succeeded and was committed with this timestamp.
    Refreshed(i64),
}

/// Decides whether to refresh and moves fetched data into the store.
///
/// Holds no mutable state of its own; clones share the same store, source and
/// clock, and concurrent calls only meet at [`TranslationStore::commit`].
#[derive(Clone)]
pub struct TranslationCacheController {
    /// Cache being kept fresh
    store: Arc<TranslationStore>,
    /// Remote table provider
    source: Arc<dyn TranslationSource>,
    /// Time source for staleness and commit stamps
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TranslationCacheController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCacheController")
            .field("store", &self.store)
            .field("source", &"<TranslationSource>")
            .field("clock", &"<Clock>")
            .finish()
    }
}

impl TranslationCacheController {
    #[must_use]
    pub fn new(
        store: Arc<TranslationStore>,
        source: Arc<dyn TranslationSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, source, clock }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub async fn is_stale(&self) -> bool {
        is_stale(self.store.last_fetch_timestamp().await, self.clock.now_millis())
    }

    /// Makes sure the cache is no older than [`CACHE_DURATION_MS`].
    ///
    /// Without `force_refresh` a fresh cache returns [`RefreshOutcome::CacheHit`]
    /// without network access. On fetch failure the store is left untouched.
    pub async fn ensure_fresh(&self, force_refresh: bool) -> Result<RefreshOutcome, RefreshError> {
        if !force_refresh {
            let last_fetch = self.store.last_fetch_timestamp().await;
            if !is_stale(last_fetch, self.clock.now_millis()) {
                tracing::debug!(last_fetch, "Translation cache is fresh, skipping fetch");
                return Ok(RefreshOutcome::CacheHit);
            }
        }

        let remote = match self.source.fetch_remote().await {
            Ok(remote) => remote,
            Err(error) => {
                tracing::warn!(
                    kind = error.kind(),
                    contract_break = error.is_contract_break(),
                    "Translation refresh failed, keeping cached data"
                );
                return Err(error.into());
            }
        };

        let now = self.clock.now_millis();
        self.store.commit(&remote.en, &remote.vn, now).await?;
        Ok(RefreshOutcome::Refreshed(now))
    }

    /// Runs [`Self::ensure_fresh`] on the runtime.
    ///
    /// Dropping the handle does not cancel the refresh; a fetch that completes
    /// still commits.
    #[must_use]
    pub fn ensure_fresh_detached(
        &self,
        force_refresh: bool,
    ) -> JoinHandle<Result<RefreshOutcome, RefreshError>> {
        let controller = self.clone();
        tokio::spawn(async move { controller.ensure_fresh(force_refresh).await })
    }

    /// Commits hand-edited tables without fetching.
    pub async fn save_manually(&self, en: &StringTable, vn: &StringTable) -> Result<(), StoreError> {
        self.store.commit(en, vn, self.clock.now_millis()).await
    }
}
