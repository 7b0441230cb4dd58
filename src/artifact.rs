//! Artifact records and their derived identity.
//!
//! A build refers to an artifact by [`ArtifactId`], a digest of the
//! artifact's content. Two artifacts with the same content get the same
//! id and are interchangeable.

use crate::keys::{ArtifactSetKey, CharacterKey};
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The five equipment positions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

impl SlotKey {
    pub const ALL: [SlotKey; 5] = [
        SlotKey::Flower,
        SlotKey::Plume,
        SlotKey::Sands,
        SlotKey::Goblet,
        SlotKey::Circlet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::Flower => "flower",
            SlotKey::Plume => "plume",
            SlotKey::Sands => "sands",
            SlotKey::Goblet => "goblet",
            SlotKey::Circlet => "circlet",
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secondary stat roll. The value is already the final magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Substat {
    pub key: StatKey,
    pub value: f64,
}

impl Substat {
    pub fn new(key: StatKey, value: f64) -> Self {
        Self { key, value }
    }
}

/// An owned artifact.
///
/// The main stat's magnitude is not stored; it is looked up from the
/// scaling tables by rarity and level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub set_key: ArtifactSetKey,
    pub slot_key: SlotKey,
    pub level: u8,
    pub rarity: u8,
    pub main_stat_key: StatKey,
    #[serde(default, with = "crate::weapon::location")]
    pub location: Option<CharacterKey>,
    #[serde(default)]
    pub lock: bool,
    #[serde(default)]
    pub substats: Vec<Substat>,
}

impl Artifact {
    pub fn new(
        set_key: impl Into<ArtifactSetKey>,
        slot_key: SlotKey,
        rarity: u8,
        level: u8,
        main_stat_key: StatKey,
    ) -> Self {
        Self {
            set_key: set_key.into(),
            slot_key,
            level,
            rarity,
            main_stat_key,
            location: None,
            lock: false,
            substats: Vec::new(),
        }
    }

    pub fn with_substat(mut self, key: StatKey, value: f64) -> Self {
        self.substats.push(Substat::new(key, value));
        self
    }

    /// Derive this artifact's content identity.
    pub fn id(&self) -> ArtifactId {
        ArtifactId::of(self)
    }

    /// Sum of substat rolls for `key`.
    pub fn substat_total(&self, key: StatKey) -> f64 {
        self.substats
            .iter()
            .filter(|sub| sub.key == key)
            .map(|sub| sub.value)
            .sum()
    }
}

/// Content-derived artifact identity.
///
/// The lowercase hex SHA-256 of set, slot, rarity, level, main stat and
/// the ordered substats. Location and lock are not part of it.
///
/// # Examples
///
/// ```rust
/// use buildstat::{Artifact, SlotKey, StatKey};
///
/// let a = Artifact::new("GladiatorsFinale", SlotKey::Flower, 5, 20, StatKey::Hp)
///     .with_substat(StatKey::CritRate, 3.9);
/// let mut b = a.clone();
/// b.lock = true;
/// assert_eq!(a.id(), b.id());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn of(artifact: &Artifact) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical_form(artifact).as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArtifactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_form(artifact: &Artifact) -> String {
    let substats: String = artifact
        .substats
        .iter()
        .map(|sub| format!("{}={};", sub.key, sub.value))
        .collect();
    format!(
        "{}|{}|{}|{}|{}|{}",
        artifact.set_key,
        artifact.slot_key,
        artifact.rarity,
        artifact.level,
        artifact.main_stat_key,
        substats
    )
}
