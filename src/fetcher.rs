//! Remote translation source.

use std::time::Duration;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use url::Url;

use crate::config::Settings;
use crate::types::StringTable;

/// Why a fetch produced no usable data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("Translation server is unreachable")]
    NetworkUnavailable,
    #[error("Translation server rejected the request with status {0}")]
    ServerRejected(u16),
    #[error("Translation server returned a malformed payload")]
    MalformedPayload,
}

impl FetchError {
    /// Short label for logs and telemetry.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::NetworkUnavailable => "network_unavailable",
            Self::ServerRejected(_) => "server_rejected",
            Self::MalformedPayload => "malformed_payload",
        }
    }

    /// Whether the server broke the wire contract, as opposed to a
    /// connectivity problem.
    #[must_use]
    pub const fn is_contract_break(self) -> bool {
        matches!(self, Self::MalformedPayload)
    }
}

/// Bilingual payload: `{ "en": {...}, "vn": {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RemoteTranslations {
    pub en: StringTable,
    pub vn: StringTable,
}

/// Decodes a response body.
///
/// Both language objects must be present; keys missing inside them become
/// empty strings.
pub fn parse_payload(body: &[u8]) -> Result<RemoteTranslations, FetchError> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::warn!(%error, "Translation payload does not match the expected shape");
        FetchError::MalformedPayload
    })
}

/// Something that can produce a fresh bilingual table pair.
///
/// One call is one attempt: no retries and no side effects.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    async fn fetch_remote(&self) -> Result<RemoteTranslations, FetchError>;
}

/// HTTP implementation issuing a single `GET` to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslationFetcher {
    /// Client carrying the connect/read timeouts
    client: reqwest::Client,
    /// Fixed translations URL
    endpoint: Url,
}

impl HttpTranslationFetcher {
    pub fn new(
        endpoint: Url,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, crate::Error> {
        let endpoint = Url::parse(&settings.endpoint)?;
        Ok(Self::new(
            endpoint,
            Duration::from_secs(settings.connect_timeout_secs),
            Duration::from_secs(settings.read_timeout_secs),
        )?)
    }
}

#[async_trait]
impl TranslationSource for HttpTranslationFetcher {
    async fn fetch_remote(&self) -> Result<RemoteTranslations, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching translations");

        let response = self.client.get(self.endpoint.clone()).send().await.map_err(|error| {
            tracing::warn!(%error, endpoint = %self.endpoint, "Translation request failed");
            FetchError::NetworkUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, endpoint = %self.endpoint, "Translation server rejected request");
            return Err(FetchError::ServerRejected(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|error| {
            tracing::warn!(%error, "Failed to read translation response body");
            FetchError::NetworkUnavailable
        })?;

        parse_payload(&body)
    }
}
