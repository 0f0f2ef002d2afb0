//! Core types used throughout the project.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// UI language supported by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Vn,
}

impl LanguageCode {
    pub const ALL: [Self; 2] = [Self::En, Self::Vn];

    /// Wire code (`"en"` / `"vn"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vn => "vn",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language '{0}'. Expected one of: en, vn")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            // "vi" is the ISO 639-1 code; accept it as an alias.
            "vn" | "vi" => Ok(Self::Vn),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Declares the closed set of UI string keys together with their wire names.
macro_rules! string_keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Named UI-text key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StringKey {
            $($variant,)+
        }

        impl StringKey {
            /// Every known key, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// camelCase name used in payloads and persisted JSON.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

string_keys! {
    Hello => "hello",
    NoticeBoard => "noticeBoard",
    ViewMore => "viewMore",
    UpcomingEvent => "upcomingEvent",
    ExamArchive => "examArchive",
    Notifications => "notifications",
    All => "all",
    Unread => "unread",
    NoUnreadNotices => "noUnreadNotices",
    NoNotices => "noNotices",
    Back => "back",
    Placeholder => "placeholder",
    AcademicAffairs => "academicAffairs",
    Research => "research",
    Events => "events",
    General => "general",
    NavHome => "navHome",
    NavEvents => "navEvents",
    NavNotices => "navNotices",
    NavExams => "navExams",
    Login => "login",
    Logout => "logout",
    Settings => "settings",
    Language => "language",
    UploadPaper => "uploadPaper",
    Loading => "loading",
}

impl fmt::Display for StringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from every [`StringKey`] to a value for one language.
///
/// Every key is always present; an empty value means "not translated yet".
/// Serialized as a flat JSON object keyed by [`StringKey::name`]. When
/// deserializing, absent keys and `null` values become empty strings and
/// unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    entries: BTreeMap<StringKey, String>,
}

impl StringTable {
    /// Table with every key set to the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: StringKey::ALL.iter().map(|key| (*key, String::new())).collect() }
    }

    /// Builds a table from `(key, value)` pairs; unlisted keys stay empty.
    #[must_use]
    pub fn from_pairs<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (StringKey, V)>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.set(key, value);
        }
        table
    }

    #[must_use]
    pub fn get(&self, key: StringKey) -> &str {
        self.entries.get(&key).map_or("", String::as_str)
    }

    pub fn set(&mut self, key: StringKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    /// Whether every key holds a non-empty value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        StringKey::ALL.iter().all(|key| !self.get(*key).is_empty())
    }

    /// Whether every key is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries.values().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StringKey, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for StringTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(key, value)| (key.name(), value)))
    }
}

impl<'de> Deserialize<'de> for StringTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Option<String>>::deserialize(deserializer)?;
        let mut table = Self::new();
        for (name, value) in raw {
            if let Some(key) = StringKey::from_name(&name) {
                table.set(key, value.unwrap_or_default());
            }
        }
        Ok(table)
    }
}
