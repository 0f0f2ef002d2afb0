//! club-i18n
//!
//! Bilingual (EN/VN) UI strings for the club app: a remote table is fetched at
//! most once a day, cached on disk, and merged key by key over compiled-in
//! defaults so the UI never renders a blank label.

pub mod admin;
pub mod cli;
pub mod config;
pub mod controller;
pub mod defaults;
mod error;
pub mod fetcher;
pub mod resolver;
pub mod store;
mod test_utils;
pub mod types;

pub use controller::TranslationCacheController;
pub use error::Error;
pub use fetcher::HttpTranslationFetcher;
pub use resolver::StringResolver;
pub use store::TranslationStore;
