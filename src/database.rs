//! GOOD database documents.
//!
//! A database is the player's inventory exported by a scanner: owned
//! characters, artifacts and weapons. Builds point into it.

use crate::aggregate::Loadout;
use crate::artifact::{Artifact, ArtifactId, SlotKey};
use crate::build::Build;
use crate::character::Character;
use crate::data::GameTables;
use crate::error::StoreError;
use crate::keys::CharacterKey;
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Format tag of database documents.
pub const GOOD_FORMAT: &str = "GOOD";

/// Check a document's `format` tag before accepting it.
pub(crate) fn check_format(document: &Value, expected: &'static str) -> Result<(), StoreError> {
    match document.get("format").and_then(Value::as_str) {
        Some(found) if found == expected => Ok(()),
        found => {
            tracing::warn!(expected, found = ?found, "rejected import");
            Err(StoreError::InvalidImport {
                expected,
                found: found.map(str::to_string),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub format: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            format: GOOD_FORMAT.to_string(),
            version: 1,
            source: String::new(),
            characters: Vec::new(),
            artifacts: Vec::new(),
            weapons: Vec::new(),
        }
    }
}

impl Database {
    /// Parse a GOOD document, rejecting it unless `format` is `"GOOD"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use buildstat::{Database, StoreError};
    ///
    /// let db = Database::from_json(r#"{ "format": "GOOD", "version": 1, "source": "scanner" }"#)
    ///     .unwrap();
    /// assert!(db.artifacts.is_empty());
    ///
    /// let err = Database::from_json(r#"{ "format": "GBM" }"#).unwrap_err();
    /// assert!(matches!(err, StoreError::InvalidImport { .. }));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: Value = serde_json::from_str(json)?;
        check_format(&document, GOOD_FORMAT)?;
        Ok(serde_json::from_value(document)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn character(&self, key: &CharacterKey) -> Option<&Character> {
        self.characters.iter().find(|c| &c.key == key)
    }

    /// Hash every artifact once for repeated lookups by id.
    pub fn index(&self) -> DatabaseIndex<'_> {
        DatabaseIndex::new(self)
    }

    /// Artifacts that fit `slot`.
    pub fn artifacts_for_slot(&self, slot: SlotKey) -> Vec<&Artifact> {
        self.artifacts
            .iter()
            .filter(|a| a.slot_key == slot)
            .collect()
    }

    /// Owned weapons the character can wield, according to `tables`.
    ///
    /// Empty if the character or a weapon is missing from the tables.
    pub fn weapons_for_character(&self, tables: &GameTables, key: &CharacterKey) -> Vec<&Weapon> {
        let Some(character) = tables.characters.get(key) else {
            return Vec::new();
        };
        self.weapons
            .iter()
            .filter(|w| {
                tables
                    .weapons
                    .get(&w.key)
                    .is_some_and(|data| data.weapon_type == character.weapon_type)
            })
            .collect()
    }

    /// Look up what a build points at.
    ///
    /// References that are not in this database resolve to nothing. To
    /// resolve several builds, build an [`index`](Self::index) once.
    pub fn resolve(&self, build: &Build) -> Loadout {
        self.index().resolve(build)
    }
}

/// Id lookups over a database, each artifact hashed once.
///
/// Borrows the database, so it cannot outlive or drift from it.
#[derive(Debug)]
pub struct DatabaseIndex<'a> {
    database: &'a Database,
    artifacts: HashMap<ArtifactId, &'a Artifact>,
}

impl<'a> DatabaseIndex<'a> {
    pub fn new(database: &'a Database) -> Self {
        let artifacts = database
            .artifacts
            .iter()
            .map(|artifact| (artifact.id(), artifact))
            .collect();
        Self {
            database,
            artifacts,
        }
    }

    pub fn artifact(&self, id: &ArtifactId) -> Option<&'a Artifact> {
        self.artifacts.get(id).copied()
    }

    /// See [`Database::resolve`].
    pub fn resolve(&self, build: &Build) -> Loadout {
        let character = build.character.as_ref().and_then(|key| {
            let found = self.database.character(key).cloned();
            if found.is_none() {
                tracing::warn!(
                    build = %build.label,
                    character = %key,
                    "character not in database"
                );
            }
            found
        });

        let artifacts = build
            .artifacts
            .iter()
            .filter_map(|(slot, id)| {
                let found = self.artifact(id).cloned();
                if found.is_none() {
                    tracing::warn!(build = %build.label, %slot, %id, "artifact not in database");
                }
                found
            })
            .collect();

        Loadout::new(character, build.weapon.clone(), artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_key::StatKey;

    fn database() -> Database {
        Database {
            characters: vec![Character::new("Diluc").with_level(90, 6)],
            artifacts: vec![
                Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp),
                Artifact::new("Set", SlotKey::Goblet, 5, 20, StatKey::PyroDamage),
                Artifact::new("Set", SlotKey::Goblet, 5, 16, StatKey::AtkPercent),
            ],
            weapons: vec![Weapon::new("Rainslasher"), Weapon::new("Amenoma")],
            ..Database::default()
        }
    }

    #[test]
    fn test_missing_format_rejected() {
        let err = Database::from_json(r#"{ "characters": [] }"#).unwrap_err();
        match err {
            StoreError::InvalidImport { expected, found } => {
                assert_eq!(expected, "GOOD");
                assert_eq!(found, None);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_materials_ignored() {
        let db = Database::from_json(
            r#"{ "format": "GOOD", "version": 2, "source": "x", "materials": { "Ore": 10 } }"#,
        )
        .unwrap();
        assert_eq!(db.version, 2);
    }

    #[test]
    fn test_artifacts_for_slot() {
        let db = database();
        assert_eq!(db.artifacts_for_slot(SlotKey::Goblet).len(), 2);
        assert!(db.artifacts_for_slot(SlotKey::Circlet).is_empty());
    }

    #[test]
    fn test_resolve_build() {
        let db = database();
        let goblet = db.artifacts[1].clone();
        let build = Build::new("Diluc")
            .with_character("Diluc")
            .with_weapon(Some(Weapon::new("Rainslasher")))
            .with_artifact(&goblet);

        let loadout = db.resolve(&build);
        assert_eq!(loadout.character.unwrap().level, 90);
        assert_eq!(loadout.weapon.unwrap().key.as_str(), "Rainslasher");
        assert_eq!(loadout.artifacts, vec![goblet]);
    }

    #[test]
    fn test_resolve_dangling_references() {
        let db = database();
        let stranger = Artifact::new("Other", SlotKey::Plume, 4, 0, StatKey::Atk);
        let build = Build::new("ghost")
            .with_character("Nobody")
            .with_artifact(&stranger);

        let loadout = db.resolve(&build);
        assert!(loadout.character.is_none());
        assert!(loadout.artifacts.is_empty());
    }

    #[test]
    fn test_index_resolves_many_builds() {
        let db = database();
        let index = db.index();
        for artifact in &db.artifacts {
            assert_eq!(index.artifact(&artifact.id()), Some(artifact));
        }

        let flower = Build::new("a").with_character("Diluc").with_artifact(&db.artifacts[0]);
        let goblet = Build::new("b").with_artifact(&db.artifacts[2]);
        assert_eq!(index.resolve(&flower), db.resolve(&flower));
        assert_eq!(index.resolve(&goblet).artifacts, vec![db.artifacts[2].clone()]);
        assert!(index.resolve(&goblet).character.is_none());
    }

    #[test]
    fn test_index_of_duplicate_artifacts() {
        let mut db = database();
        db.artifacts.push(db.artifacts[0].clone());
        let index = db.index();
        assert_eq!(index.artifact(&db.artifacts[0].id()), Some(&db.artifacts[3]));
    }

    #[test]
    fn test_weapons_for_character() {
        let tables = GameTables::from_json(
            r#"{
                "characters": {
                    "Diluc": {
                        "weapon_type": "claymore",
                        "base": { "hp": 1.0, "atk": 1.0, "def_": 1.0 },
                        "scalings": { "level_multipliers": [], "ascension_values": {} }
                    }
                },
                "weapons": {
                    "Rainslasher": {
                        "weapon_type": "claymore",
                        "base_atk": { "base_value": 1.0, "curve": [] },
                        "ascension_base_atk": []
                    },
                    "Amenoma": {
                        "weapon_type": "sword",
                        "base_atk": { "base_value": 1.0, "curve": [] },
                        "ascension_base_atk": []
                    }
                }
            }"#,
        )
        .unwrap();
        let db = database();
        let weapons = db.weapons_for_character(&tables, &CharacterKey::new("Diluc"));
        assert_eq!(weapons.len(), 1);
        assert_eq!(weapons[0].key.as_str(), "Rainslasher");
        assert!(db
            .weapons_for_character(&tables, &CharacterKey::new("Nobody"))
            .is_empty());
    }
}
