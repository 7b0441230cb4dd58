//! Character records, as stored in a GOOD database.

use crate::keys::CharacterKey;
use serde::{Deserialize, Serialize};

/// Talent levels for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talents {
    pub auto: u8,
    pub skill: u8,
    pub burst: u8,
}

impl Default for Talents {
    fn default() -> Self {
        Self {
            auto: 1,
            skill: 1,
            burst: 1,
        }
    }
}

/// An owned character.
///
/// Level and ascension are assumed consistent with each other; nothing
/// here checks the game's level caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub key: CharacterKey,
    pub level: u8,
    #[serde(default)]
    pub constellation: u8,
    pub ascension: u8,
    #[serde(default, rename = "talent")]
    pub talents: Talents,
}

impl Character {
    /// A level 1, unascended character.
    pub fn new(key: impl Into<CharacterKey>) -> Self {
        Self {
            key: key.into(),
            level: 1,
            constellation: 0,
            ascension: 0,
            talents: Talents::default(),
        }
    }

    pub fn with_level(mut self, level: u8, ascension: u8) -> Self {
        self.level = level;
        self.ascension = ascension;
        self
    }
}
