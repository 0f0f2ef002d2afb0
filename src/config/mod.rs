//! Runtime configuration.
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    AdminSettings,
    CONFIG_FILE_NAME,
    ConfigError,
    Settings,
    ValidationError,
};
