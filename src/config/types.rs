use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use url::Url;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = ".club-i18n.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "admin.bindAddress")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// URL returning `{ "en": {...}, "vn": {...} }`.
    pub endpoint: String,

    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,

    /// Local cache document. Relative paths resolve against the config directory.
    pub cache_path: PathBuf,

    pub admin: AdminSettings,
}

/// Settings for the translation editing service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    pub bind_address: String,
    /// Source-of-truth document served to clients.
    pub source_path: PathBuf,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            source_path: PathBuf::from("translations-source.json"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/translations".to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 10,
            cache_path: PathBuf::from("translations-cache.json"),
            admin: AdminSettings::default(),
        }
    }
}

impl Settings {
    /// # Errors
    /// - Endpoint is not an http(s) URL
    /// - A timeout is zero
    /// - A path is empty
    /// - Bind address is not `host:port`
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "endpoint",
                format!("Unsupported scheme '{}'. Use http or https", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "endpoint",
                format!("Invalid URL '{}': {e}", self.endpoint),
            )),
        }

        if self.connect_timeout_secs == 0 {
            errors.push(ValidationError::new("connectTimeoutSecs", "Timeout must be at least 1 second"));
        }
        if self.read_timeout_secs == 0 {
            errors.push(ValidationError::new("readTimeoutSecs", "Timeout must be at least 1 second"));
        }

        if self.cache_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "cachePath",
                "The path cannot be empty. Example: \"translations-cache.json\"",
            ));
        }

        if self.admin.source_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "admin.sourcePath",
                "The path cannot be empty. Example: \"translations-source.json\"",
            ));
        }

        if let Err(e) = self.admin.bind_address.parse::<SocketAddr>() {
            errors.push(ValidationError::new(
                "admin.bindAddress",
                format!("Invalid socket address '{}': {e}", self.admin.bind_address),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = Settings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"readTimeoutSecs": 3, "admin": {"bindAddress": "0.0.0.0:9000"}}"#;

        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_that!(settings.read_timeout_secs, eq(3));
        assert_that!(settings.connect_timeout_secs, eq(10));
        assert_that!(settings.admin.bind_address, eq("0.0.0.0:9000"));
        assert_that!(settings.admin.source_path, eq(&PathBuf::from("translations-source.json")));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: Settings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.endpoint, eq("http://127.0.0.1:8080/translations"));
        assert_that!(settings.cache_path, eq(&PathBuf::from("translations-cache.json")));
    }

    #[rstest]
    #[case::not_a_url("not a url", "Invalid URL")]
    #[case::wrong_scheme("ftp://club.example.org/translations", "Unsupported scheme")]
    fn validate_invalid_endpoint(#[case] endpoint: &str, #[case] message: &str) {
        let settings = Settings { endpoint: endpoint.to_string(), ..Settings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("endpoint")),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn validate_zero_timeouts() {
        let settings =
            Settings { connect_timeout_secs: 0, read_timeout_secs: 0, ..Settings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.field_path, eq("connectTimeoutSecs")),
                field!(ValidationError.field_path, eq("readTimeoutSecs"))
            ])
        );
    }

    #[rstest]
    fn validate_invalid_bind_address() {
        let settings = Settings {
            admin: AdminSettings { bind_address: "localhost".to_string(), ..AdminSettings::default() },
            ..Settings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("admin.bindAddress")),
                field!(ValidationError.message, contains_substring("localhost"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = Settings {
            cache_path: PathBuf::new(),
            admin: AdminSettings { source_path: PathBuf::new(), ..AdminSettings::default() },
            ..Settings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. cachePath"));
        assert_that!(error_message, contains_substring("2. admin.sourcePath"));
    }
}
