//! Shared test helpers.
//!
//! Fakes for the clock, the remote source and a broken key-value store.
#![cfg(test)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{
    AtomicI64,
    AtomicUsize,
    Ordering,
};
use std::time::Duration;

use async_trait::async_trait;

use crate::controller::Clock;
use crate::fetcher::{
    FetchError,
    RemoteTranslations,
    TranslationSource,
};
use crate::store::{
    KeyValueStore,
    StoreError,
    Write,
};
use crate::types::{
    StringKey,
    StringTable,
};

/// Builds a table from `(key, value)` pairs; other keys stay empty.
pub(crate) fn table(pairs: &[(StringKey, &str)]) -> StringTable {
    StringTable::from_pairs(pairs.iter().map(|(key, value)| (*key, *value)))
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub(crate) struct FakeClock {
    /// Current time in epoch milliseconds
    now: AtomicI64,
}

impl FakeClock {
    pub(crate) const fn new(now: i64) -> Self {
        Self { now: AtomicI64::new(now) }
    }
}

impl Clock for FakeClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Source replaying scripted results and counting calls.
///
/// Once the script runs out the last result repeats.
#[derive(Debug)]
pub(crate) struct StubSource {
    /// Remaining results, front first
    script: Mutex<VecDeque<Result<RemoteTranslations, FetchError>>>,
    /// Number of `fetch_remote` calls so far
    calls: AtomicUsize,
    /// Simulated network latency
    delay: Duration,
}

impl StubSource {
    pub(crate) fn sequence(results: Vec<Result<RemoteTranslations, FetchError>>) -> Self {
        Self { script: Mutex::new(results.into()), calls: AtomicUsize::new(0), delay: Duration::ZERO }
    }

    pub(crate) fn succeeding(payload: RemoteTranslations) -> Self {
        Self::sequence(vec![Ok(payload)])
    }

    pub(crate) fn failing(error: FetchError) -> Self {
        Self::sequence(vec![Err(error)])
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_result(&self) -> Result<RemoteTranslations, FetchError> {
        let mut script = self.script.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if script.len() > 1 {
            script.pop_front().unwrap_or(Err(FetchError::NetworkUnavailable))
        } else {
            script.front().cloned().unwrap_or(Err(FetchError::NetworkUnavailable))
        }
    }
}

#[async_trait]
impl TranslationSource for StubSource {
    async fn fetch_remote(&self) -> Result<RemoteTranslations, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.next_result();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}

/// Key-value store whose every operation fails.
#[derive(Debug)]
pub(crate) struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("storage unavailable")))
    }

    async fn write_batch(&self, _writes: Vec<Write>) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("storage unavailable")))
    }
}
