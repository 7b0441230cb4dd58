//! Build library configuration.

use serde::{Deserialize, Serialize};

/// Where and how the library lays out its keys.
///
/// Missing fields fall back to their defaults when loading.
///
/// # Examples
///
/// ```rust
/// use buildstat::LibraryConfig;
///
/// let config = LibraryConfig::from_json(r#"{ "build_prefix": "b/" }"#).unwrap();
/// assert_eq!(config.build_prefix, "b/");
/// assert_eq!(config.database_key, "GOODDatabase");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Key holding the imported GOOD database.
    pub database_key: String,
    /// Prefix for every stored build key.
    pub build_prefix: String,
    /// Version written into backups.
    pub backup_version: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database_key: "GOODDatabase".to_string(),
            build_prefix: "build:".to_string(),
            backup_version: 1,
        }
    }
}

impl LibraryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
