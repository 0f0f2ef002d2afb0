//! Crate-level error for wiring components together.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid translation endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Admin service failed: {0}")]
    Server(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
