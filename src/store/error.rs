use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("Failed to access translation storage: {0}")]
    Io(#[from] std::io::Error),
    /// Stored JSON could not be encoded or decoded
    #[error("Failed to encode or decode stored translations: {0}")]
    Serialization(#[from] serde_json::Error),
    /// `last_fetch_time` did not hold a decimal integer
    #[error("Stored fetch timestamp is not a number: '{0}'")]
    InvalidTimestamp(String),
}
