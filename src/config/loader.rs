//! Config file loading.

use std::path::Path;

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    Settings,
};

/// Reads `.club-i18n.json` from `config_dir`.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no config file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_dir(config_dir: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: Settings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_dir`: valid config file
    #[rstest]
    fn test_load_from_dir_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"endpoint": "https://club.example.org/api/translations"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        assert_eq!(settings.unwrap().endpoint, "https://club.example.org/api/translations");
    }

    /// `load_from_dir`: no config file
    #[rstest]
    fn test_load_from_dir_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_dir`: JSON parse error
    #[rstest]
    fn test_load_from_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
