//! Stat key module.
//!
//! Provides the `StatKey` type, the closed set of stat tags used by the
//! GOOD data format. Keys ending in `_` are percentages; the rest are
//! flat magnitudes.

use crate::error::StatError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A stat tag as it appears in GOOD documents.
///
/// # Examples
///
/// ```rust
/// use buildstat::StatKey;
///
/// let key: StatKey = "atk_".parse().unwrap();
/// assert_eq!(key, StatKey::AtkPercent);
/// assert_eq!(key.as_str(), "atk_");
/// assert_eq!(key.base_key(), Some(StatKey::Atk));
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    #[serde(rename = "hp")]
    Hp,
    #[serde(rename = "hp_")]
    HpPercent,
    #[serde(rename = "atk")]
    Atk,
    #[serde(rename = "atk_")]
    AtkPercent,
    #[serde(rename = "def")]
    Def,
    #[serde(rename = "def_")]
    DefPercent,
    #[serde(rename = "eleMas")]
    ElementalMastery,
    #[serde(rename = "enerRech_")]
    EnergyRecharge,
    #[serde(rename = "heal_")]
    HealingBonus,
    #[serde(rename = "critRate_")]
    CritRate,
    #[serde(rename = "critDMG_")]
    CritDamage,
    #[serde(rename = "physical_dmg_")]
    PhysicalDamage,
    #[serde(rename = "anemo_dmg_")]
    AnemoDamage,
    #[serde(rename = "geo_dmg_")]
    GeoDamage,
    #[serde(rename = "electro_dmg_")]
    ElectroDamage,
    #[serde(rename = "hydro_dmg_")]
    HydroDamage,
    #[serde(rename = "pyro_dmg_")]
    PyroDamage,
    #[serde(rename = "cryo_dmg_")]
    CryoDamage,
    #[serde(rename = "dendro_dmg_")]
    DendroDamage,
}

impl StatKey {
    /// Every stat key, in sheet order.
    pub const ALL: [StatKey; 19] = [
        StatKey::Hp,
        StatKey::HpPercent,
        StatKey::Atk,
        StatKey::AtkPercent,
        StatKey::Def,
        StatKey::DefPercent,
        StatKey::ElementalMastery,
        StatKey::EnergyRecharge,
        StatKey::HealingBonus,
        StatKey::CritRate,
        StatKey::CritDamage,
        StatKey::PhysicalDamage,
        StatKey::AnemoDamage,
        StatKey::GeoDamage,
        StatKey::ElectroDamage,
        StatKey::HydroDamage,
        StatKey::PyroDamage,
        StatKey::CryoDamage,
        StatKey::DendroDamage,
    ];

    /// The elemental damage bonuses, in the order the active bonus is searched.
    pub const ELEMENTAL: [StatKey; 8] = [
        StatKey::PhysicalDamage,
        StatKey::AnemoDamage,
        StatKey::GeoDamage,
        StatKey::ElectroDamage,
        StatKey::HydroDamage,
        StatKey::PyroDamage,
        StatKey::CryoDamage,
        StatKey::DendroDamage,
    ];

    /// The GOOD tag for this key.
    pub fn as_str(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::HpPercent => "hp_",
            StatKey::Atk => "atk",
            StatKey::AtkPercent => "atk_",
            StatKey::Def => "def",
            StatKey::DefPercent => "def_",
            StatKey::ElementalMastery => "eleMas",
            StatKey::EnergyRecharge => "enerRech_",
            StatKey::HealingBonus => "heal_",
            StatKey::CritRate => "critRate_",
            StatKey::CritDamage => "critDMG_",
            StatKey::PhysicalDamage => "physical_dmg_",
            StatKey::AnemoDamage => "anemo_dmg_",
            StatKey::GeoDamage => "geo_dmg_",
            StatKey::ElectroDamage => "electro_dmg_",
            StatKey::HydroDamage => "hydro_dmg_",
            StatKey::PyroDamage => "pyro_dmg_",
            StatKey::CryoDamage => "cryo_dmg_",
            StatKey::DendroDamage => "dendro_dmg_",
        }
    }

    /// Human-readable name, as shown in a stats table.
    pub fn label(self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::HpPercent => "HP%",
            StatKey::Atk => "ATK",
            StatKey::AtkPercent => "ATK%",
            StatKey::Def => "DEF",
            StatKey::DefPercent => "DEF%",
            StatKey::ElementalMastery => "Elemental Mastery",
            StatKey::EnergyRecharge => "Energy Recharge",
            StatKey::HealingBonus => "Healing Bonus",
            StatKey::CritRate => "Crit Rate",
            StatKey::CritDamage => "Crit DMG",
            StatKey::PhysicalDamage => "Physical DMG Bonus",
            StatKey::AnemoDamage => "Anemo DMG Bonus",
            StatKey::GeoDamage => "Geo DMG Bonus",
            StatKey::ElectroDamage => "Electro DMG Bonus",
            StatKey::HydroDamage => "Hydro DMG Bonus",
            StatKey::PyroDamage => "Pyro DMG Bonus",
            StatKey::CryoDamage => "Cryo DMG Bonus",
            StatKey::DendroDamage => "Dendro DMG Bonus",
        }
    }

    /// Whether the tag carries the percentage suffix.
    pub fn is_percent(self) -> bool {
        self.as_str().ends_with('_')
    }

    /// Whether this is one of HP%, ATK%, DEF%, which scale a base stat.
    pub fn is_percent_scaling(self) -> bool {
        matches!(
            self,
            StatKey::HpPercent | StatKey::AtkPercent | StatKey::DefPercent
        )
    }

    /// Whether this is one of the eight elemental damage bonuses.
    pub fn is_elemental(self) -> bool {
        Self::ELEMENTAL.contains(&self)
    }

    /// The percentage key that scales this flat key (`hp` -> `hp_`).
    pub fn percent_key(self) -> Option<StatKey> {
        match self {
            StatKey::Hp => Some(StatKey::HpPercent),
            StatKey::Atk => Some(StatKey::AtkPercent),
            StatKey::Def => Some(StatKey::DefPercent),
            _ => None,
        }
    }

    /// The flat key a percentage key scales (`hp_` -> `hp`).
    pub fn base_key(self) -> Option<StatKey> {
        match self {
            StatKey::HpPercent => Some(StatKey::Hp),
            StatKey::AtkPercent => Some(StatKey::Atk),
            StatKey::DefPercent => Some(StatKey::Def),
            _ => None,
        }
    }
}

impl FromStr for StatKey {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StatError::UnknownStatKey(s.to_string()))
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_tags() {
        for key in StatKey::ALL {
            assert_eq!(key.as_str().parse::<StatKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "mana".parse::<StatKey>().unwrap_err();
        assert_eq!(err, StatError::UnknownStatKey("mana".to_string()));
    }

    #[test]
    fn test_serde_uses_good_tags() {
        let json = serde_json::to_string(&StatKey::CritDamage).unwrap();
        assert_eq!(json, "\"critDMG_\"");
        let key: StatKey = serde_json::from_str("\"eleMas\"").unwrap();
        assert_eq!(key, StatKey::ElementalMastery);
    }

    #[test]
    fn test_percent_classification() {
        assert!(StatKey::AtkPercent.is_percent());
        assert!(StatKey::AtkPercent.is_percent_scaling());
        assert!(StatKey::CritRate.is_percent());
        assert!(!StatKey::CritRate.is_percent_scaling());
        assert!(!StatKey::ElementalMastery.is_percent());
        assert!(!StatKey::Hp.is_percent());
    }

    #[test]
    fn test_flat_percent_pairs() {
        assert_eq!(StatKey::Def.percent_key(), Some(StatKey::DefPercent));
        assert_eq!(StatKey::DefPercent.base_key(), Some(StatKey::Def));
        assert_eq!(StatKey::CritRate.percent_key(), None);
        assert_eq!(StatKey::EnergyRecharge.base_key(), None);
    }

    #[test]
    fn test_elemental_order() {
        assert_eq!(StatKey::ELEMENTAL[0], StatKey::PhysicalDamage);
        assert_eq!(StatKey::ELEMENTAL[7], StatKey::DendroDamage);
        assert!(StatKey::ELEMENTAL.iter().all(|k| k.is_elemental()));
        assert_eq!(StatKey::ALL.iter().filter(|k| k.is_elemental()).count(), 8);
    }
}
