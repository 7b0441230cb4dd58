//! Static game data.
//!
//! The tables are generated elsewhere and consumed read-only. `GameData`
//! is the seam the rest of the crate looks up through; `GameTables` is the
//! JSON-backed implementation.

use crate::keys::{CharacterKey, WeaponKey};
use crate::stat_key::StatKey;
use crate::weapon::WeaponType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A character's three scalable base stats.
///
/// Also used for level multipliers and ascension bonuses, which share the
/// same shape in the tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: f64,
    pub atk: f64,
    #[serde(rename = "def_")]
    pub def: f64,
}

impl BaseStats {
    pub fn new(hp: f64, atk: f64, def: f64) -> Self {
        Self { hp, atk, def }
    }

    /// The base value a percentage key scales against.
    pub fn for_percent_key(&self, key: StatKey) -> Option<f64> {
        match key {
            StatKey::HpPercent => Some(self.hp),
            StatKey::AtkPercent => Some(self.atk),
            StatKey::DefPercent => Some(self.def),
            _ => None,
        }
    }
}

/// Per-level and per-ascension curves for one character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterScaling {
    /// Indexed by `level - 1`.
    pub level_multipliers: Vec<BaseStats>,
    /// Keyed by ascension phase.
    pub ascension_values: BTreeMap<u8, BaseStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub weapon_type: WeaponType,
    pub base: BaseStats,
    pub scalings: CharacterScaling,
}

/// A value that grows with level: `base_value * curve[level - 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub base_value: f64,
    pub curve: Vec<f64>,
}

impl LevelCurve {
    pub fn at_level(&self, level: u8) -> Option<f64> {
        let index = usize::from(level).checked_sub(1)?;
        self.curve.get(index).map(|scalar| self.base_value * scalar)
    }
}

/// A weapon's secondary stat. Fractional stats are stored as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSecondary {
    pub key: StatKey,
    #[serde(flatten)]
    pub curve: LevelCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponData {
    pub weapon_type: WeaponType,
    pub base_atk: LevelCurve,
    /// Indexed by ascension phase.
    pub ascension_base_atk: Vec<f64>,
    #[serde(default)]
    pub secondary: Option<WeaponSecondary>,
}

/// Read-only access to the game's static tables.
pub trait GameData {
    /// The raw main-stat table entry, in the table's native unit.
    fn artifact_main_stat(&self, rarity: u8, level: u8, stat: StatKey) -> Option<f64>;

    fn character(&self, key: &CharacterKey) -> Option<&CharacterData>;

    fn weapon(&self, key: &WeaponKey) -> Option<&WeaponData>;
}

/// JSON-backed game tables.
///
/// # Examples
///
/// ```rust
/// use buildstat::{GameData, GameTables, StatKey};
///
/// let tables = GameTables::from_json(r#"{
///     "artifacts": { "5": { "20": { "atk_": 0.466, "hp": 4780 } } },
///     "characters": {},
///     "weapons": {}
/// }"#).unwrap();
///
/// assert_eq!(tables.artifact_main_stat(5, 20, StatKey::Hp), Some(4780.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTables {
    /// rarity -> level -> stat -> raw value
    #[serde(default)]
    pub artifacts: BTreeMap<u8, BTreeMap<u8, HashMap<StatKey, f64>>>,
    #[serde(default)]
    pub characters: HashMap<CharacterKey, CharacterData>,
    #[serde(default)]
    pub weapons: HashMap<WeaponKey, WeaponData>,
}

impl GameTables {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Weapon keys belonging to one weapon family, sorted.
    pub fn weapons_of_type(&self, weapon_type: WeaponType) -> Vec<&WeaponKey> {
        let mut keys: Vec<_> = self
            .weapons
            .iter()
            .filter(|(_, data)| data.weapon_type == weapon_type)
            .map(|(key, _)| key)
            .collect();
        keys.sort();
        keys
    }
}

impl GameData for GameTables {
    fn artifact_main_stat(&self, rarity: u8, level: u8, stat: StatKey) -> Option<f64> {
        self.artifacts
            .get(&rarity)?
            .get(&level)?
            .get(&stat)
            .copied()
    }

    fn character(&self, key: &CharacterKey) -> Option<&CharacterData> {
        self.characters.get(key)
    }

    fn weapon(&self, key: &WeaponKey) -> Option<&WeaponData> {
        self.weapons.get(key)
    }
}
