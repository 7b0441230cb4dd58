//! Scaling lookup.
//!
//! Pure lookups of level/ascension/rarity-dependent values from the game
//! tables. A combination the tables do not define is a data error and is
//! returned as a `StatError`, never defaulted.

use crate::data::{BaseStats, CharacterData, GameData, WeaponData};
use crate::error::StatError;
use crate::keys::{CharacterKey, WeaponKey};
use crate::stat_key::StatKey;

/// Interpret a table value below 1.0 as a fraction and convert it to
/// percentage points. Values of 1.0 and above pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use buildstat::scaling::fraction_to_points;
///
/// assert_eq!(fraction_to_points(0.466), 46.6);
/// assert_eq!(fraction_to_points(311.0), 311.0);
/// ```
pub fn fraction_to_points(raw: f64) -> f64 {
    if raw < 1.0 {
        raw * 100.0
    } else {
        raw
    }
}

/// Main-stat magnitude of an artifact of the given rarity and level.
///
/// Percentage stats come back in percentage points, flat stats as their
/// absolute magnitude.
pub fn main_stat_value<D: GameData + ?Sized>(
    data: &D,
    rarity: u8,
    level: u8,
    stat: StatKey,
) -> Result<f64, StatError> {
    data.artifact_main_stat(rarity, level, stat)
        .map(fraction_to_points)
        .ok_or(StatError::MissingArtifactScaling {
            rarity,
            level,
            stat,
        })
}

fn weapon_data<'a, D: GameData + ?Sized>(
    data: &'a D,
    key: &WeaponKey,
) -> Result<&'a WeaponData, StatError> {
    data.weapon(key)
        .ok_or_else(|| StatError::UnknownWeapon(key.to_string()))
}

/// `base_value * curve[level - 1] + ascension_bonus[ascension]`
pub fn weapon_base_atk<D: GameData + ?Sized>(
    data: &D,
    key: &WeaponKey,
    level: u8,
    ascension: u8,
) -> Result<f64, StatError> {
    let weapon = weapon_data(data, key)?;
    let leveled = weapon
        .base_atk
        .at_level(level)
        .ok_or_else(|| StatError::MissingWeaponLevel {
            key: key.to_string(),
            level,
        })?;
    let bonus = weapon
        .ascension_base_atk
        .get(usize::from(ascension))
        .copied()
        .ok_or_else(|| StatError::MissingWeaponAscension {
            key: key.to_string(),
            ascension,
        })?;
    Ok(leveled + bonus)
}

/// The weapon's secondary stat at `level`, if it rolls `stat`.
///
/// Returned in the table's native unit; fractional stats stay fractions.
pub fn weapon_secondary_stat<D: GameData + ?Sized>(
    data: &D,
    key: &WeaponKey,
    level: u8,
    stat: StatKey,
) -> Result<Option<f64>, StatError> {
    let weapon = weapon_data(data, key)?;
    let Some(secondary) = weapon.secondary.as_ref().filter(|s| s.key == stat) else {
        return Ok(None);
    };
    secondary
        .curve
        .at_level(level)
        .map(Some)
        .ok_or_else(|| StatError::MissingWeaponLevel {
            key: key.to_string(),
            level,
        })
}

fn character_data<'a, D: GameData + ?Sized>(
    data: &'a D,
    key: &CharacterKey,
) -> Result<&'a CharacterData, StatError> {
    data.character(key)
        .ok_or_else(|| StatError::UnknownCharacter(key.to_string()))
}

pub fn character_level_scalar<D: GameData + ?Sized>(
    data: &D,
    key: &CharacterKey,
    level: u8,
) -> Result<BaseStats, StatError> {
    let character = character_data(data, key)?;
    usize::from(level)
        .checked_sub(1)
        .and_then(|index| character.scalings.level_multipliers.get(index))
        .copied()
        .ok_or_else(|| StatError::MissingCharacterLevel {
            key: key.to_string(),
            level,
        })
}

pub fn character_ascension_bonus<D: GameData + ?Sized>(
    data: &D,
    key: &CharacterKey,
    ascension: u8,
) -> Result<BaseStats, StatError> {
    let character = character_data(data, key)?;
    character
        .scalings
        .ascension_values
        .get(&ascension)
        .copied()
        .ok_or_else(|| StatError::MissingCharacterAscension {
            key: key.to_string(),
            ascension,
        })
}

/// The character's unscaled base stats.
pub fn character_base<D: GameData + ?Sized>(
    data: &D,
    key: &CharacterKey,
) -> Result<BaseStats, StatError> {
    character_data(data, key).map(|character| character.base)
}
