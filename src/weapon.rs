//! Weapon records, as stored in a GOOD database or embedded in a build.

use crate::keys::{CharacterKey, WeaponKey};
use serde::{Deserialize, Serialize};

/// Weapon families. Each weapon key belongs to exactly one.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Sword,
    Claymore,
    Polearm,
    Bow,
    Catalyst,
}

/// An owned weapon.
///
/// `location` is the character currently holding it; the empty string in
/// GOOD documents means nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub key: WeaponKey,
    pub level: u8,
    pub ascension: u8,
    pub refinement: u8,
    #[serde(default, with = "location")]
    pub location: Option<CharacterKey>,
    #[serde(default)]
    pub lock: bool,
}

impl Weapon {
    /// A level 1, refinement 1 weapon nobody holds.
    pub fn new(key: impl Into<WeaponKey>) -> Self {
        Self {
            key: key.into(),
            level: 1,
            ascension: 0,
            refinement: 1,
            location: None,
            lock: false,
        }
    }

    pub fn with_level(mut self, level: u8, ascension: u8) -> Self {
        self.level = level;
        self.ascension = ascension;
        self
    }

    pub fn with_refinement(mut self, refinement: u8) -> Self {
        self.refinement = refinement;
        self
    }

    /// Whether two weapons are the same copy for equipping purposes.
    ///
    /// Compares key, level, ascension and refinement. Who holds it and
    /// whether it is locked do not matter.
    pub fn same_as(&self, other: &Weapon) -> bool {
        self.key == other.key
            && self.level == other.level
            && self.ascension == other.ascension
            && self.refinement == other.refinement
    }
}

/// GOOD encodes "unequipped" as `""`.
pub(crate) mod location {
    use crate::keys::CharacterKey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<CharacterKey>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_ref().map(|k| k.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CharacterKey>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(CharacterKey::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_as_ignores_location_and_lock() {
        let a = Weapon::new("Deathmatch").with_level(90, 6);
        let mut b = a.clone();
        b.location = Some(CharacterKey::new("Xiao"));
        b.lock = true;
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_same_as_compares_refinement() {
        let a = Weapon::new("Deathmatch").with_level(90, 6);
        let b = a.clone().with_refinement(5);
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_empty_location_is_none() {
        let json = r#"{
            "key": "Deathmatch", "level": 80, "ascension": 5,
            "refinement": 2, "location": "", "lock": true
        }"#;
        let weapon: Weapon = serde_json::from_str(json).unwrap();
        assert_eq!(weapon.location, None);
        assert!(weapon.lock);

        let back = serde_json::to_value(&weapon).unwrap();
        assert_eq!(back["location"], "");
    }

    #[test]
    fn test_weapon_type_tags() {
        let t: WeaponType = serde_json::from_str("\"polearm\"").unwrap();
        assert_eq!(t, WeaponType::Polearm);
    }
}
