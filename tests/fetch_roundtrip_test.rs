//! End-to-end tests: admin service, HTTP fetcher, cache controller and resolver.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use club_i18n::admin::{
    self,
    AdminState,
    KeyUpdate,
    KeyValue,
};
use club_i18n::controller::{
    RefreshError,
    RefreshOutcome,
    SystemClock,
};
use club_i18n::fetcher::{
    FetchError,
    TranslationSource,
};
use club_i18n::store::{
    FileKeyValueStore,
    MemoryKeyValueStore,
};
use club_i18n::types::{
    LanguageCode,
    StringKey,
};
use club_i18n::{
    HttpTranslationFetcher,
    StringResolver,
    TranslationCacheController,
    TranslationStore,
};
use googletest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;

async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });
    addr
}

async fn spawn_admin() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = TranslationStore::open(Arc::new(MemoryKeyValueStore::new())).await;
    let state = AdminState::new(Arc::new(store), Arc::new(SystemClock));
    tokio::spawn(admin::serve(listener, state));
    addr
}

fn fetcher_for(addr: SocketAddr, path: &str) -> HttpTranslationFetcher {
    let endpoint = Url::parse(&format!("http://{addr}{path}")).unwrap();
    HttpTranslationFetcher::new(endpoint, Duration::from_secs(2), Duration::from_secs(2)).unwrap()
}

async fn put_key(addr: SocketAddr, lang: &str, key: &str, value: &str) -> KeyValue {
    let response = reqwest::Client::new()
        .put(format!("http://{addr}/translations/{lang}/{key}"))
        .json(&KeyUpdate { value: value.to_string() })
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_admin_edit_is_visible_to_fetcher() {
    let addr = spawn_admin().await;

    let updated = put_key(addr, "vn", "back", "Quay lại").await;
    let remote = fetcher_for(addr, "/translations").fetch_remote().await.unwrap();

    assert_eq!(updated, KeyValue { key: "back".to_string(), value: "Quay lại".to_string() });
    assert_that!(remote.vn.get(StringKey::Back), eq("Quay lại"));
    assert_that!(remote.en.is_blank(), eq(true));
}

#[tokio::test]
async fn test_admin_rejects_unknown_key() {
    let addr = spawn_admin().await;

    let response = reqwest::get(format!("http://{addr}/translations/en/doesNotExist")).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh_populates_cache_and_resolver() {
    let addr = spawn_admin().await;
    put_key(addr, "en", "noticeBoard", "Club Board").await;
    put_key(addr, "vn", "noticeBoard", "Bảng tin CLB").await;

    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("translations-cache.json");
    let store =
        Arc::new(TranslationStore::open(Arc::new(FileKeyValueStore::new(&cache_path))).await);
    let controller = TranslationCacheController::new(
        store,
        Arc::new(fetcher_for(addr, "/translations")),
        Arc::new(SystemClock),
    );

    let first = controller.ensure_fresh(false).await.unwrap();
    let second = controller.ensure_fresh(false).await.unwrap();

    assert!(matches!(first, RefreshOutcome::Refreshed(_)));
    assert_eq!(second, RefreshOutcome::CacheHit);

    // A new store over the same file sees the committed data.
    let reopened = Arc::new(TranslationStore::open(Arc::new(FileKeyValueStore::new(&cache_path))).await);
    let resolver = StringResolver::new(reopened);
    let vn = resolver.resolve(LanguageCode::Vn).await;
    assert_that!(vn.get(StringKey::NoticeBoard), eq("Bảng tin CLB"));
    assert_that!(vn.get(StringKey::Hello), eq("Xin chào,"));
    assert_that!(vn.is_complete(), eq(true));
}

#[rstest]
#[case::service_unavailable(StatusCode::SERVICE_UNAVAILABLE)]
#[case::not_found(StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_non_success_status_is_rejected(#[case] status: StatusCode) {
    let addr = spawn_router(Router::new().route("/translations", get(move || async move { status }))).await;

    let result = fetcher_for(addr, "/translations").fetch_remote().await;

    assert_eq!(result, Err(FetchError::ServerRejected(status.as_u16())));
}

#[rstest]
#[case::html("<html>maintenance</html>")]
#[case::missing_language(r#"{"en": {"hello": "Hi"}}"#)]
#[tokio::test]
async fn test_malformed_body_is_rejected(#[case] body: &'static str) {
    let addr = spawn_router(Router::new().route("/translations", get(move || async move { body }))).await;

    let result = fetcher_for(addr, "/translations").fetch_remote().await;

    assert_eq!(result, Err(FetchError::MalformedPayload));
}

#[tokio::test]
async fn test_unreachable_host_is_network_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = fetcher_for(addr, "/translations").fetch_remote().await;

    assert_eq!(result, Err(FetchError::NetworkUnavailable));
}

#[tokio::test]
async fn test_failed_refresh_keeps_defaults_visible() {
    let addr = spawn_router(
        Router::new().route("/translations", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
    )
    .await;
    let store = Arc::new(TranslationStore::open(Arc::new(MemoryKeyValueStore::new())).await);
    let controller = TranslationCacheController::new(
        store.clone(),
        Arc::new(fetcher_for(addr, "/translations")),
        Arc::new(SystemClock),
    );

    let result = controller.ensure_fresh(true).await;

    assert!(matches!(result, Err(RefreshError::Fetch(FetchError::ServerRejected(500)))));
    assert_that!(store.last_fetch_timestamp().await, eq(0));
    let en = StringResolver::new(store).resolve(LanguageCode::En).await;
    assert_that!(en.get(StringKey::Back), eq("Back"));
}

#[tokio::test]
async fn test_read_timeout_is_network_unavailable() {
    let slow = get(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "{}"
    });
    let addr = spawn_router(Router::new().route("/translations", slow)).await;
    let endpoint = Url::parse(&format!("http://{addr}/translations")).unwrap();
    let fetcher =
        HttpTranslationFetcher::new(endpoint, Duration::from_secs(1), Duration::from_secs(1)).unwrap();

    let result = fetcher.fetch_remote().await;

    assert_eq!(result, Err(FetchError::NetworkUnavailable));
}

#[tokio::test]
async fn test_refresh_recovers_corrupt_cache_file() {
    let addr = spawn_admin().await;
    put_key(addr, "en", "back", "Go back").await;

    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("translations-cache.json");
    std::fs::write(&cache_path, "{truncated").unwrap();
    let store =
        Arc::new(TranslationStore::open(Arc::new(FileKeyValueStore::new(&cache_path))).await);
    let controller = TranslationCacheController::new(
        store,
        Arc::new(fetcher_for(addr, "/translations")),
        Arc::new(SystemClock),
    );

    let outcome = controller.ensure_fresh(false).await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::Refreshed(_)));
    let reopened = Arc::new(TranslationStore::open(Arc::new(FileKeyValueStore::new(&cache_path))).await);
    assert_that!(reopened.last_fetch_timestamp().await, gt(0));
    let en = StringResolver::new(reopened).resolve(LanguageCode::En).await;
    assert_that!(en.get(StringKey::Back), eq("Go back"));
}
