//! Stat aggregation.
//!
//! Turns a loadout (character, weapon, equipped artifacts) into a full
//! stat sheet. Flat stats and percentage stats take separate paths:
//!
//! ```text
//! hp, atk, def        = flat_plus_weapon(key) + percent_bonus(key_)
//! hp_, atk_, def_     = percent_bonus(key)            (already flat)
//! everything else     = flat_plus_weapon(key)
//! ```
//!
//! HP%, ATK% and DEF% main stats are only counted on the percentage path
//! so they are never added twice.

use crate::artifact::Artifact;
use crate::base_stats::base_stats;
use crate::character::Character;
use crate::data::GameData;
use crate::error::StatError;
use crate::resolved::ResolvedStat;
use crate::resolver::StatResolver;
use crate::scaling::{self, fraction_to_points};
use crate::source::{ArtifactSource, PercentSource, WeaponSource};
use crate::stat_key::StatKey;
use crate::transform::{AddStatTransform, ScaleByBaseTransform};
use crate::weapon::Weapon;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a sheet is computed from, with references already resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loadout {
    pub character: Option<Character>,
    pub weapon: Option<Weapon>,
    pub artifacts: Vec<Artifact>,
}

impl Loadout {
    pub fn new(
        character: Option<Character>,
        weapon: Option<Weapon>,
        artifacts: Vec<Artifact>,
    ) -> Self {
        Self {
            character,
            weapon,
            artifacts,
        }
    }
}

/// Artifact contributions to `stat`: matching main stats (except HP%, ATK%
/// and DEF%) plus matching substats at face value.
pub fn stat_sum<D: GameData + ?Sized>(
    data: &D,
    artifacts: &[Artifact],
    stat: StatKey,
) -> Result<f64, StatError> {
    let mut total = 0.0;
    for artifact in artifacts {
        if artifact.main_stat_key == stat && !stat.is_percent_scaling() {
            total += scaling::main_stat_value(data, artifact.rarity, artifact.level, stat)?;
        }
        total += artifact.substat_total(stat);
    }
    Ok(total)
}

/// The weapon's secondary stat for `stat`, as the flat path counts it.
///
/// Zero unless both a character and a weapon are present. A raw value
/// below 1.0 is taken as a fraction and converted to points; anything
/// else is added as-is.
pub fn weapon_contribution<D: GameData + ?Sized>(
    data: &D,
    character: Option<&Character>,
    weapon: Option<&Weapon>,
    stat: StatKey,
) -> Result<f64, StatError> {
    let (Some(_), Some(weapon)) = (character, weapon) else {
        return Ok(0.0);
    };
    let raw = scaling::weapon_secondary_stat(data, &weapon.key, weapon.level, stat)?.unwrap_or(0.0);
    Ok(fraction_to_points(raw))
}

/// `stat_sum` plus the weapon's normalized secondary stat.
pub fn flat_plus_weapon<D: GameData + ?Sized>(
    data: &D,
    artifacts: &[Artifact],
    stat: StatKey,
    character: Option<&Character>,
    weapon: Option<&Weapon>,
) -> Result<f64, StatError> {
    Ok(stat_sum(data, artifacts, stat)? + weapon_contribution(data, character, weapon, stat)?)
}

/// Total percentage points for a percentage stat.
///
/// Counts matching main stats (HP%/ATK%/DEF% included) and substats. The
/// weapon's raw value is always multiplied by 100 here, with no magnitude
/// check, and only when a character is present.
pub fn percent_points<D: GameData + ?Sized>(
    data: &D,
    artifacts: &[Artifact],
    stat: StatKey,
    character: Option<&Character>,
    weapon: Option<&Weapon>,
) -> Result<f64, StatError> {
    let mut total = 0.0;
    for artifact in artifacts {
        if artifact.main_stat_key == stat {
            total += scaling::main_stat_value(data, artifact.rarity, artifact.level, stat)?;
        }
        total += artifact.substat_total(stat);
    }

    if let (Some(_), Some(weapon)) = (character, weapon) {
        let raw = scaling::weapon_secondary_stat(data, &weapon.key, weapon.level, stat)?;
        total += raw.unwrap_or(0.0) * 100.0;
    }

    Ok(total)
}

/// Flat bonus from HP%, ATK% or DEF%: `points / 100 * base`.
///
/// The base is the character's resolved HP, ATK (weapon included) or DEF.
/// Without a character the multiplier is 1. Keys other than the three
/// base-scaling percentages also use a multiplier of 1.
pub fn percent_bonus<D: GameData + ?Sized>(
    data: &D,
    artifacts: &[Artifact],
    stat: StatKey,
    character: Option<&Character>,
    weapon: Option<&Weapon>,
) -> Result<f64, StatError> {
    let base = base_stats(data, character, weapon)?.and_then(|b| b.for_percent_key(stat));
    let points = percent_points(data, artifacts, stat, character, weapon)?;
    Ok(points / 100.0 * base.unwrap_or(1.0))
}

/// The elemental damage bonus that applies to a build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementalBonus {
    pub stat: StatKey,
    pub value: f64,
}

/// A resolved value for every stat key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSheet {
    stats: BTreeMap<StatKey, ResolvedStat>,
}

impl StatSheet {
    /// The value for `stat`, zero if it was not resolved.
    pub fn value(&self, stat: StatKey) -> f64 {
        self.stats.get(&stat).map(|r| r.value).unwrap_or(0.0)
    }

    /// The full breakdown for `stat`.
    pub fn get(&self, stat: StatKey) -> Option<&ResolvedStat> {
        self.stats.get(&stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatKey, &ResolvedStat)> {
        self.stats.iter()
    }

    /// The first nonzero elemental bonus, searched physical, anemo, geo,
    /// electro, hydro, pyro, cryo, dendro.
    pub fn active_elemental_bonus(&self) -> Option<ElementalBonus> {
        StatKey::ELEMENTAL
            .iter()
            .map(|&stat| ElementalBonus {
                stat,
                value: self.value(stat),
            })
            .find(|bonus| bonus.value != 0.0)
    }

    /// Value of the active elemental bonus, zero if there is none.
    pub fn elemental_bonus_value(&self) -> f64 {
        self.active_elemental_bonus()
            .map(|bonus| bonus.value)
            .unwrap_or(0.0)
    }
}

/// Compute the full sheet for a loadout.
///
/// # Examples
///
/// ```rust
/// use buildstat::{build_stat_sheet, GameTables, Loadout, StatKey};
///
/// let sheet = build_stat_sheet(&GameTables::default(), &Loadout::default()).unwrap();
/// assert_eq!(sheet.value(StatKey::Atk), 0.0);
/// assert!(sheet.active_elemental_bonus().is_none());
/// ```
pub fn build_stat_sheet<D: GameData + ?Sized>(
    data: &D,
    loadout: &Loadout,
) -> Result<StatSheet, StatError> {
    let character = loadout.character.as_ref();
    let weapon = loadout.weapon.as_ref();
    let artifacts = loadout.artifacts.as_slice();
    let base = base_stats(data, character, weapon)?;

    let mut resolver = StatResolver::new();
    for stat in StatKey::ALL {
        if stat.is_percent_scaling() {
            resolver.register_source(
                stat,
                Box::new(PercentSource::new(data, artifacts, character, weapon)),
            );
            let multiplier = base.and_then(|b| b.for_percent_key(stat));
            resolver.register_transform(stat, Box::new(ScaleByBaseTransform::new(multiplier)));
        } else {
            resolver.register_source(stat, Box::new(ArtifactSource::new(data, artifacts)));
            resolver.register_source(stat, Box::new(WeaponSource::new(data, character, weapon)));
            if let Some(percent) = stat.percent_key() {
                resolver.register_transform(stat, Box::new(AddStatTransform::new(percent)));
            }
        }
    }

    let stats = resolver.resolve_all()?;
    tracing::debug!(
        character = ?character.map(|c| c.key.as_str()),
        artifacts = artifacts.len(),
        "resolved stat sheet"
    );
    Ok(StatSheet { stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::SlotKey;
    use crate::data::GameTables;

    const EPS: f64 = 1e-9;

    fn tables() -> GameTables {
        GameTables::from_json(
            r#"{
                "artifacts": {
                    "5": {
                        "20": {
                            "hp": 4780, "atk": 311, "hp_": 0.466, "atk_": 0.466,
                            "def_": 0.583, "critRate_": 0.311, "pyro_dmg_": 0.466
                        }
                    }
                },
                "characters": {
                    "Diluc": {
                        "weapon_type": "claymore",
                        "base": { "hp": 1000.0, "atk": 100.0, "def_": 50.0 },
                        "scalings": {
                            "level_multipliers": [{ "hp": 1.0, "atk": 1.0, "def_": 1.0 }],
                            "ascension_values": { "0": { "hp": 0.0, "atk": 0.0, "def_": 0.0 } }
                        }
                    }
                },
                "weapons": {
                    "Blackcliff": {
                        "weapon_type": "claymore",
                        "base_atk": { "base_value": 400.0, "curve": [1.0] },
                        "ascension_base_atk": [0.0],
                        "secondary": { "key": "critDMG_", "base_value": 0.12, "curve": [1.0] }
                    },
                    "Whiteblind": {
                        "weapon_type": "claymore",
                        "base_atk": { "base_value": 400.0, "curve": [1.0] },
                        "ascension_base_atk": [0.0],
                        "secondary": { "key": "def_", "base_value": 0.113, "curve": [1.0] }
                    },
                    "Sacrificial": {
                        "weapon_type": "claymore",
                        "base_atk": { "base_value": 400.0, "curve": [1.0] },
                        "ascension_base_atk": [0.0],
                        "secondary": { "key": "eleMas", "base_value": 36.0, "curve": [1.0] }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn diluc() -> Character {
        Character::new("Diluc")
    }

    #[test]
    fn test_stat_sum_empty_is_zero() {
        let data = tables();
        for stat in StatKey::ALL {
            assert_eq!(stat_sum(&data, &[], stat).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_stat_sum_main_and_substats() {
        let data = tables();
        let artifacts = vec![
            Artifact::new("Set", SlotKey::Circlet, 5, 20, StatKey::CritRate)
                .with_substat(StatKey::CritDamage, 7.8),
            Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp)
                .with_substat(StatKey::CritRate, 3.9),
        ];
        let crit = stat_sum(&data, &artifacts, StatKey::CritRate).unwrap();
        assert!((crit - (31.1 + 3.9)).abs() < EPS);
        assert_eq!(stat_sum(&data, &artifacts, StatKey::Hp).unwrap(), 4780.0);
    }

    #[test]
    fn test_stat_sum_skips_percent_main_stats() {
        let data = tables();
        let sands = Artifact::new("Set", SlotKey::Sands, 5, 20, StatKey::AtkPercent)
            .with_substat(StatKey::AtkPercent, 5.8);
        assert_eq!(
            stat_sum(&data, &[sands], StatKey::AtkPercent).unwrap(),
            5.8
        );
    }

    #[test]
    fn test_stat_sum_propagates_lookup_miss() {
        let data = tables();
        let odd = Artifact::new("Set", SlotKey::Flower, 4, 20, StatKey::Hp);
        assert!(matches!(
            stat_sum(&data, &[odd], StatKey::Hp),
            Err(StatError::MissingArtifactScaling { rarity: 4, .. })
        ));
    }

    #[test]
    fn test_atk_percent_main_stat_only_on_percent_path() {
        let data = tables();
        let character = diluc();
        let plume = Artifact::new("Set", SlotKey::Plume, 5, 20, StatKey::Atk);
        let sands = Artifact::new("Set", SlotKey::Sands, 5, 20, StatKey::AtkPercent);

        let before = vec![plume.clone()];
        let after = vec![plume, sands];

        let flat_before =
            flat_plus_weapon(&data, &before, StatKey::Atk, Some(&character), None).unwrap();
        let flat_after =
            flat_plus_weapon(&data, &after, StatKey::Atk, Some(&character), None).unwrap();
        assert_eq!(flat_before, flat_after);

        let pct_before =
            percent_bonus(&data, &before, StatKey::AtkPercent, Some(&character), None).unwrap();
        let pct_after =
            percent_bonus(&data, &after, StatKey::AtkPercent, Some(&character), None).unwrap();
        assert_eq!(pct_before, 0.0);
        assert!((pct_after - 46.6).abs() < EPS); // 46.6% of base 100
    }

    #[test]
    fn test_weapon_needs_character() {
        let data = tables();
        let weapon = Weapon::new("Blackcliff");
        assert_eq!(
            flat_plus_weapon(&data, &[], StatKey::CritDamage, None, Some(&weapon)).unwrap(),
            0.0
        );
        let with_character =
            flat_plus_weapon(&data, &[], StatKey::CritDamage, Some(&diluc()), Some(&weapon))
                .unwrap();
        assert!((with_character - 12.0).abs() < EPS);
    }

    #[test]
    fn test_weapon_flat_secondary_not_scaled() {
        let data = tables();
        let weapon = Weapon::new("Sacrificial");
        let em = flat_plus_weapon(
            &data,
            &[],
            StatKey::ElementalMastery,
            Some(&diluc()),
            Some(&weapon),
        )
        .unwrap();
        assert_eq!(em, 36.0);
    }

    #[test]
    fn test_percent_bonus_weapon_secondary() {
        let data = tables();
        let character = diluc();
        let weapon = Weapon::new("Whiteblind");
        // 11.3 points of DEF against base DEF 50
        let bonus =
            percent_bonus(&data, &[], StatKey::DefPercent, Some(&character), Some(&weapon))
                .unwrap();
        assert!((bonus - 0.113 * 100.0 / 100.0 * 50.0).abs() < EPS);
    }

    #[test]
    fn test_percent_bonus_without_character_uses_one() {
        let data = tables();
        let sands = Artifact::new("Set", SlotKey::Sands, 5, 20, StatKey::HpPercent);
        let bonus = percent_bonus(&data, &[sands], StatKey::HpPercent, None, None).unwrap();
        assert!((bonus - 0.466).abs() < EPS);
    }

    #[test]
    fn test_sheet_matches_component_functions() {
        let data = tables();
        let character = diluc();
        let weapon = Weapon::new("Whiteblind");
        let artifacts = vec![
            Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp)
                .with_substat(StatKey::Atk, 50.0)
                .with_substat(StatKey::DefPercent, 7.3),
            Artifact::new("Set", SlotKey::Sands, 5, 20, StatKey::AtkPercent),
            Artifact::new("Set", SlotKey::Goblet, 5, 20, StatKey::PyroDamage),
        ];
        let loadout = Loadout::new(
            Some(character.clone()),
            Some(weapon.clone()),
            artifacts.clone(),
        );
        let sheet = build_stat_sheet(&data, &loadout).unwrap();

        for (flat, pct) in [
            (StatKey::Hp, StatKey::HpPercent),
            (StatKey::Atk, StatKey::AtkPercent),
            (StatKey::Def, StatKey::DefPercent),
        ] {
            let expected =
                flat_plus_weapon(&data, &artifacts, flat, Some(&character), Some(&weapon)).unwrap()
                    + percent_bonus(&data, &artifacts, pct, Some(&character), Some(&weapon))
                        .unwrap();
            assert_eq!(sheet.value(flat), expected);
            assert_eq!(
                sheet.value(pct),
                percent_bonus(&data, &artifacts, pct, Some(&character), Some(&weapon)).unwrap()
            );
        }

        let active = sheet.active_elemental_bonus().unwrap();
        assert_eq!(active.stat, StatKey::PyroDamage);
        assert!((active.value - 46.6).abs() < EPS);
    }

    #[test]
    fn test_sheet_breakdown_labels() {
        let data = tables();
        let loadout = Loadout::new(
            Some(diluc()),
            Some(Weapon::new("Blackcliff")),
            vec![Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp)],
        );
        let sheet = build_stat_sheet(&data, &loadout).unwrap();

        let hp = sheet.get(StatKey::Hp).unwrap();
        assert_eq!(hp.sources[0].0, "Artifacts (1)");
        assert_eq!(hp.sources[1].0, "Weapon Blackcliff");
        assert_eq!(hp.transforms[0].0, "+ hp_");

        let hp_pct = sheet.get(StatKey::HpPercent).unwrap();
        assert_eq!(hp_pct.transforms.len(), 1);
        assert_eq!(sheet.iter().count(), StatKey::ALL.len());
    }

    #[test]
    fn test_no_elemental_bonus() {
        let data = tables();
        let sheet = build_stat_sheet(&data, &Loadout::default()).unwrap();
        assert_eq!(sheet.active_elemental_bonus(), None);
        assert_eq!(sheet.elemental_bonus_value(), 0.0);
    }
}
