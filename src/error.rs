//! Error types for stat resolution and build persistence.
//!
//! `StatError` covers everything that can go wrong while computing a
//! sheet: scaling-table misses and dependency problems. `StoreError`
//! covers imports, saves and the key-value store underneath.

use crate::stat_key::StatKey;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[StatKey]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur during stat resolution.
///
/// Scaling-table misses are data errors, not user errors. They are
/// surfaced instead of defaulting to zero.
///
/// # Examples
///
/// ```rust
/// use buildstat::{StatError, StatKey};
///
/// let err = StatError::MissingArtifactScaling { rarity: 5, level: 21, stat: StatKey::Hp };
/// assert!(err.to_string().contains("rarity 5"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// No main-stat entry for this rarity/level/stat combination.
    #[error("No artifact scaling for rarity {rarity}, level {level}, stat {stat}")]
    MissingArtifactScaling { rarity: u8, level: u8, stat: StatKey },

    /// The character key is not in the game data.
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    /// The character's level has no multiplier row.
    #[error("No level multipliers for character {key} at level {level}")]
    MissingCharacterLevel { key: String, level: u8 },

    /// The character's ascension phase has no bonus row.
    #[error("No ascension values for character {key} at ascension {ascension}")]
    MissingCharacterAscension { key: String, ascension: u8 },

    /// The weapon key is not in the game data.
    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    /// The weapon's level has no curve entry.
    #[error("No scaling for weapon {key} at level {level}")]
    MissingWeaponLevel { key: String, level: u8 },

    /// The weapon's ascension phase has no base-attack bonus.
    #[error("No ascension bonus for weapon {key} at ascension {ascension}")]
    MissingWeaponAscension { key: String, ascension: u8 },

    /// A dependency cycle was detected between stat nodes.
    ///
    /// Contains the path of stats involved, closing on the first one.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<StatKey> },

    /// A transform read a stat that had not been resolved.
    #[error("Missing dependency: {0}")]
    MissingDependency(StatKey),

    /// A stat tag that is not part of the GOOD key set.
    #[error("Unknown stat key: {0}")]
    UnknownStatKey(String),
}

/// Errors raised by the build library and its store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document's `format` tag did not match.
    #[error("Invalid import: expected format {expected:?}, found {found:?}")]
    InvalidImport {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("Build has no character selected")]
    MissingCharacter,

    #[error("Build has no name")]
    MissingLabel,

    #[error("No build stored under {0}")]
    NotFound(String),

    /// Another build already uses the storage key this label maps to.
    #[error("Build {label:?} would overwrite build {existing:?} (both stored as {key})")]
    KeyTaken {
        label: String,
        existing: String,
        key: String,
    },

    /// Two builds in one import map to the same storage key.
    #[error("Builds {first:?} and {second:?} would share the storage key {key}")]
    DuplicateKey {
        first: String,
        second: String,
        key: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Stat(#[from] StatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatError::UnknownWeapon("Deathmatch".to_string());
        assert!(err.to_string().contains("Deathmatch"));
    }

    #[test]
    fn test_cycle_error_display() {
        let err = StatError::Cycle {
            path: vec![StatKey::Atk, StatKey::AtkPercent, StatKey::Atk],
        };
        let display = err.to_string();
        assert!(display.contains("Cycle detected"));
        assert!(display.contains("atk -> atk_ -> atk"));
    }

    #[test]
    fn test_invalid_import_display() {
        let err = StoreError::InvalidImport {
            expected: "GOOD",
            found: Some("GBM".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("GOOD"));
        assert!(display.contains("GBM"));
    }

    #[test]
    fn test_stat_error_converts() {
        let err: StoreError = StatError::UnknownCharacter("Nobody".to_string()).into();
        assert!(matches!(err, StoreError::Stat(StatError::UnknownCharacter(_))));
    }
}
