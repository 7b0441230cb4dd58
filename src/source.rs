//! Stat sources module.
//!
//! Sources produce base values for stat nodes. Multiple sources for the
//! same stat are summed together (additive). Sources are deterministic:
//! the same equipment always produces the same value.

use crate::aggregate;
use crate::artifact::Artifact;
use crate::character::Character;
use crate::data::GameData;
use crate::error::StatError;
use crate::stat_key::StatKey;
use crate::weapon::Weapon;

/// Trait for stat sources that produce base values.
///
/// A source may need to look up scaling data, so producing a value can
/// fail with a `StatError`.
///
/// # Examples
///
/// ```rust
/// use buildstat::source::{ConstantSource, StatSource};
/// use buildstat::StatKey;
///
/// let source = ConstantSource::new("Base", 100.0);
/// assert_eq!(source.get_value(StatKey::Hp).unwrap(), 100.0);
/// ```
pub trait StatSource {
    /// Get the value this source contributes to `stat`.
    fn get_value(&self, stat: StatKey) -> Result<f64, StatError>;

    /// Label shown in the resolved breakdown.
    fn description(&self) -> String;
}

/// A labelled constant.
#[derive(Debug, Clone)]
pub struct ConstantSource {
    label: String,
    value: f64,
}

impl ConstantSource {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl StatSource for ConstantSource {
    fn get_value(&self, _stat: StatKey) -> Result<f64, StatError> {
        Ok(self.value)
    }

    fn description(&self) -> String {
        self.label.clone()
    }
}

/// Artifact main stats and substats for a flat-path stat.
///
/// See [`aggregate::stat_sum`]: HP%, ATK% and DEF% main stats are left to
/// [`PercentSource`].
pub struct ArtifactSource<'a, D: ?Sized> {
    data: &'a D,
    artifacts: &'a [Artifact],
}

impl<'a, D: GameData + ?Sized> ArtifactSource<'a, D> {
    pub fn new(data: &'a D, artifacts: &'a [Artifact]) -> Self {
        Self { data, artifacts }
    }
}

impl<D: GameData + ?Sized> StatSource for ArtifactSource<'_, D> {
    fn get_value(&self, stat: StatKey) -> Result<f64, StatError> {
        aggregate::stat_sum(self.data, self.artifacts, stat)
    }

    fn description(&self) -> String {
        format!("Artifacts ({})", self.artifacts.len())
    }
}

/// The weapon's secondary stat, normalized to the sheet's units.
///
/// Contributes nothing unless both a character and a weapon are present.
pub struct WeaponSource<'a, D: ?Sized> {
    data: &'a D,
    character: Option<&'a Character>,
    weapon: Option<&'a Weapon>,
}

impl<'a, D: GameData + ?Sized> WeaponSource<'a, D> {
    pub fn new(data: &'a D, character: Option<&'a Character>, weapon: Option<&'a Weapon>) -> Self {
        Self {
            data,
            character,
            weapon,
        }
    }
}

impl<D: GameData + ?Sized> StatSource for WeaponSource<'_, D> {
    fn get_value(&self, stat: StatKey) -> Result<f64, StatError> {
        aggregate::weapon_contribution(self.data, self.character, self.weapon, stat)
    }

    fn description(&self) -> String {
        match self.weapon {
            Some(weapon) => format!("Weapon {}", weapon.key),
            None => String::from("Weapon (none)"),
        }
    }
}

/// Total percentage points for HP%, ATK% or DEF% (artifacts and weapon).
pub struct PercentSource<'a, D: ?Sized> {
    data: &'a D,
    artifacts: &'a [Artifact],
    character: Option<&'a Character>,
    weapon: Option<&'a Weapon>,
}

impl<'a, D: GameData + ?Sized> PercentSource<'a, D> {
    pub fn new(
        data: &'a D,
        artifacts: &'a [Artifact],
        character: Option<&'a Character>,
        weapon: Option<&'a Weapon>,
    ) -> Self {
        Self {
            data,
            artifacts,
            character,
            weapon,
        }
    }
}

impl<D: GameData + ?Sized> StatSource for PercentSource<'_, D> {
    fn get_value(&self, stat: StatKey) -> Result<f64, StatError> {
        aggregate::percent_points(self.data, self.artifacts, stat, self.character, self.weapon)
    }

    fn description(&self) -> String {
        String::from("Percent points")
    }
}
