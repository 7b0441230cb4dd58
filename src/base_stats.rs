//! Base stat resolution.
//!
//! A character's HP, ATK and DEF before any percentage bonus, with the
//! equipped weapon's base ATK folded into ATK.

use crate::character::Character;
use crate::data::{BaseStats, GameData};
use crate::error::StatError;
use crate::scaling;
use crate::weapon::Weapon;

/// Resolve the scalable base stats for a character and optional weapon.
///
/// `stat = base * level_multiplier + ascension_bonus` for each of HP, ATK
/// and DEF; a weapon adds its base ATK. Returns `Ok(None)` without a
/// character. No rounding is applied.
pub fn base_stats<D: GameData + ?Sized>(
    data: &D,
    character: Option<&Character>,
    weapon: Option<&Weapon>,
) -> Result<Option<BaseStats>, StatError> {
    let Some(character) = character else {
        return Ok(None);
    };

    let base = scaling::character_base(data, &character.key)?;
    let level = scaling::character_level_scalar(data, &character.key, character.level)?;
    let ascension = scaling::character_ascension_bonus(data, &character.key, character.ascension)?;

    let mut stats = BaseStats {
        hp: base.hp * level.hp + ascension.hp,
        atk: base.atk * level.atk + ascension.atk,
        def: base.def * level.def + ascension.def,
    };

    if let Some(weapon) = weapon {
        stats.atk += scaling::weapon_base_atk(data, &weapon.key, weapon.level, weapon.ascension)?;
    }

    Ok(Some(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameTables;

    fn tables() -> GameTables {
        GameTables::from_json(
            r#"{
                "characters": {
                    "Keqing": {
                        "weapon_type": "sword",
                        "base": { "hp": 1000.0, "atk": 25.0, "def_": 60.0 },
                        "scalings": {
                            "level_multipliers": [
                                { "hp": 1.0, "atk": 1.0, "def_": 1.0 },
                                { "hp": 2.0, "atk": 3.0, "def_": 4.0 }
                            ],
                            "ascension_values": {
                                "0": { "hp": 0.0, "atk": 0.0, "def_": 0.0 },
                                "1": { "hp": 500.0, "atk": 10.0, "def_": 30.0 }
                            }
                        }
                    }
                },
                "weapons": {
                    "Amenoma": {
                        "weapon_type": "sword",
                        "base_atk": { "base_value": 40.0, "curve": [1.0, 2.0] },
                        "ascension_base_atk": [0.0, 5.0]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_no_character_is_none() {
        let data = tables();
        let weapon = Weapon::new("Amenoma");
        assert_eq!(base_stats(&data, None, Some(&weapon)).unwrap(), None);
    }

    #[test]
    fn test_level_and_ascension() {
        let data = tables();
        let keqing = Character::new("Keqing").with_level(2, 1);
        let stats = base_stats(&data, Some(&keqing), None).unwrap().unwrap();
        assert_eq!(stats, BaseStats::new(2500.0, 85.0, 270.0));
    }

    #[test]
    fn test_weapon_adds_to_atk_only() {
        let data = tables();
        let keqing = Character::new("Keqing").with_level(2, 1);
        let weapon = Weapon::new("Amenoma").with_level(2, 1);
        let stats = base_stats(&data, Some(&keqing), Some(&weapon))
            .unwrap()
            .unwrap();
        assert_eq!(stats, BaseStats::new(2500.0, 85.0 + 85.0, 270.0));
    }

    #[test]
    fn test_unknown_character_fails() {
        let data = tables();
        let nobody = Character::new("Nobody");
        assert!(matches!(
            base_stats(&data, Some(&nobody), None),
            Err(StatError::UnknownCharacter(_))
        ));
    }
}
