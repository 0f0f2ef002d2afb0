//! Holds the active settings.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
    loader,
};

/// Loads, validates and exposes settings
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Active settings
    current_settings: Settings,

    /// Directory the settings were loaded from
    config_dir: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: Settings::default(), config_dir: None }
    }

    /// Loads `.club-i18n.json` from `config_dir`, falling back to defaults.
    ///
    /// # Errors
    /// - file read error
    /// - JSON parse error
    /// - validation error
    pub fn load_settings(&mut self, config_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_dir);

        let settings = if let Some(dir) = &config_dir {
            loader::load_from_dir(dir)?.map_or_else(Settings::default, |loaded| {
                tracing::debug!("Loaded settings: {:?}", loaded);
                loaded
            })
        } else {
            Settings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_dir = config_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// Resolves a configured path against the config directory.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.config_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
