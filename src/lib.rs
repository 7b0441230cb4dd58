//! # buildstat - Stat Engine and Build Library for Character Loadouts
//!
//! Computes the final stat sheet of a character wearing a weapon and up to
//! five artifacts, and keeps a library of named builds:
//! - **Table-driven** scaling (artifact main stats, character and weapon curves)
//! - **Dependency-ordered** resolution (ATK% resolves before ATK)
//! - **Debug-friendly** breakdowns of every source and transform
//! - **Persistent** builds with GOOD database import and GBM backups
//!
//! ## Core Concepts
//!
//! ### Stat Pipeline
//!
//! ```text
//! [GameData] + [Loadout] → [StatSource] → [StatTransform] → [StatSheet]
//! ```
//!
//! 1. **Sources** sum artifact main stats, substats and weapon secondaries
//! 2. **Transforms** scale percentages by the base stat and fold them into flat stats
//! 3. **StatSheet** holds a [`ResolvedStat`] with its breakdown for every key
//!
//! ### Builds
//!
//! A [`Build`] names a character, embeds a weapon and refers to artifacts by
//! [`ArtifactId`]. A [`Database`] resolves those references into a
//! [`Loadout`]; a [`BuildLibrary`] stores builds in any [`KeyValueStore`].
//!
//! ## Example
//!
//! ```rust
//! use buildstat::*;
//!
//! let tables = GameTables::from_json(r#"{
//!     "artifacts": { "5": { "20": { "atk": 311 } } },
//!     "characters": {
//!         "Diluc": {
//!             "weapon_type": "claymore",
//!             "base": { "hp": 1000.0, "atk": 100.0, "def_": 50.0 },
//!             "scalings": {
//!                 "level_multipliers": [{ "hp": 1.0, "atk": 1.0, "def_": 1.0 }],
//!                 "ascension_values": { "0": { "hp": 0.0, "atk": 0.0, "def_": 0.0 } }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let plume = Artifact::new("Gladiator", SlotKey::Plume, 5, 20, StatKey::Atk)
//!     .with_substat(StatKey::AtkPercent, 10.0);
//! let loadout = Loadout::new(Some(Character::new("Diluc")), None, vec![plume]);
//!
//! let sheet = build_stat_sheet(&tables, &loadout).unwrap();
//! // 311 from the main stat, plus 10% of a base ATK of 100
//! assert_eq!(sheet.value(StatKey::Atk), 321.0);
//! ```
//!
//! ## Modules
//!
//! - [`stat_key`] - The closed set of stat keys
//! - [`data`] - Game tables and the [`GameData`] trait
//! - [`scaling`] - Table lookups
//! - [`aggregate`] - Stat sums and the stat sheet
//! - [`resolver`] - Dependency-ordered stat resolver
//! - [`database`] - GOOD inventory documents
//! - [`library`] - Saved builds, backups and imports
//! - [`store`] - Key-value stores
//! - [`error`] - Error types

pub mod aggregate;
pub mod artifact;
pub mod base_stats;
pub mod build;
pub mod character;
pub mod config;
pub mod data;
pub mod database;
pub mod error;
pub mod graph;
pub mod keys;
pub mod library;
pub mod resolved;
pub mod resolver;
pub mod scaling;
pub mod source;
pub mod stat_key;
pub mod store;
pub mod transform;
pub mod weapon;

// Re-export main types for convenience
pub use aggregate::{
    build_stat_sheet, flat_plus_weapon, percent_bonus, stat_sum, ElementalBonus, Loadout,
    StatSheet,
};
pub use artifact::{Artifact, ArtifactId, SlotKey, Substat};
pub use base_stats::base_stats;
pub use build::{Build, BuildArtifacts};
pub use character::{Character, Talents};
pub use config::LibraryConfig;
pub use data::{BaseStats, GameData, GameTables};
pub use database::{Database, DatabaseIndex, GOOD_FORMAT};
pub use error::{StatError, StoreError};
pub use keys::{ArtifactSetKey, CharacterKey, WeaponKey};
pub use library::{sanitize_store_key, Backup, BuildLibrary, GBM_FORMAT};
pub use resolved::ResolvedStat;
pub use resolver::StatResolver;
pub use stat_key::StatKey;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreOp};
pub use weapon::{Weapon, WeaponType};

// Re-export sources and transforms
pub use source::{ArtifactSource, ConstantSource, PercentSource, StatSource, WeaponSource};
pub use transform::{AddStatTransform, ScaleByBaseTransform, StatTransform};
