//! Admin route handlers.

use axum::Json;
use axum::extract::{
    Path,
    State,
};
use axum::http::StatusCode;
use axum::response::{
    IntoResponse,
    Response,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::AdminState;
use crate::fetcher::RemoteTranslations;
use crate::store::StoreError;
use crate::types::{
    LanguageCode,
    StringKey,
    StringTable,
};

/// One key with its value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Body of `PUT /translations/{lang}/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyUpdate {
    pub value: String,
}

/// 404 with a plain-text reason.
fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}

/// 500 after logging the storage error.
fn storage_failure(error: &StoreError) -> Response {
    tracing::warn!(%error, "Failed to save translations");
    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save translations").into_response()
}

/// Path segment to language, or a 404 response.
fn parse_language(lang: &str) -> Result<LanguageCode, Response> {
    lang.parse().map_err(|_| not_found(format!("Unknown language '{lang}'")))
}

/// Path segment to key, or a 404 response.
fn parse_key(key: &str) -> Result<StringKey, Response> {
    StringKey::from_name(key).ok_or_else(|| not_found(format!("Unknown key '{key}'")))
}

/// GET /health
pub(super) async fn health() -> &'static str {
    "ok"
}

/// GET /translations: both tables, as clients fetch them.
pub(super) async fn get_all(State(state): State<AdminState>) -> Json<RemoteTranslations> {
    let bundle = state.store.bundle().await;
    Json(RemoteTranslations { en: bundle.en, vn: bundle.vn })
}

/// GET /translations/{lang}
pub(super) async fn get_language(
    State(state): State<AdminState>,
    Path(lang): Path<String>,
) -> Response {
    let language = match parse_language(&lang) {
        Ok(language) => language,
        Err(response) => return response,
    };

    Json(state.store.get_cached(language).await).into_response()
}

/// PUT /translations/{lang}: replace one language's table.
pub(super) async fn put_language(
    State(state): State<AdminState>,
    Path(lang): Path<String>,
    Json(table): Json<StringTable>,
) -> Response {
    let language = match parse_language(&lang) {
        Ok(language) => language,
        Err(response) => return response,
    };

    let now = state.clock.now_millis();
    match state.store.update_with(now, |bundle| *bundle.table_mut(language) = table).await {
        Ok(bundle) => {
            tracing::info!(%language, "Replaced translation table");
            Json(bundle.table(language).clone()).into_response()
        }
        Err(error) => storage_failure(&error),
    }
}

/// GET /translations/{lang}/{key}
pub(super) async fn get_key(
    State(state): State<AdminState>,
    Path((lang, key)): Path<(String, String)>,
) -> Response {
    let (language, string_key) = match (parse_language(&lang), parse_key(&key)) {
        (Ok(language), Ok(string_key)) => (language, string_key),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    let table = state.store.get_cached(language).await;
    Json(KeyValue { key, value: table.get(string_key).to_string() }).into_response()
}

/// PUT /translations/{lang}/{key}: update a single value.
pub(super) async fn put_key(
    State(state): State<AdminState>,
    Path((lang, key)): Path<(String, String)>,
    Json(update): Json<KeyUpdate>,
) -> Response {
    let (language, string_key) = match (parse_language(&lang), parse_key(&key)) {
        (Ok(language), Ok(string_key)) => (language, string_key),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    let now = state.clock.now_millis();
    let value = update.value;
    match state
        .store
        .update_with(now, |bundle| bundle.table_mut(language).set(string_key, value))
        .await
    {
        Ok(bundle) => {
            tracing::info!(%language, key = %string_key, "Updated translation");
            let value = bundle.table(language).get(string_key).to_string();
            Json(KeyValue { key, value }).into_response()
        }
        Err(error) => storage_failure(&error),
    }
}
