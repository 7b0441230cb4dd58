//! Identifier types for characters, weapons and artifact sets.
//!
//! The key sets are defined by the game data, not by this crate, so each
//! identifier is an interned string. Uses `Arc<str>` for cheap clones and
//! fast comparison.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create a key from a string slice.
            pub fn new(s: &str) -> Self {
                Self(Arc::from(s))
            }

            /// Get the string representation of this key.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Arc::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.as_ref().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok($name::from(s))
            }
        }
    };
}

string_key!(
    /// A playable character, e.g. `"HuTao"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use buildstat::CharacterKey;
    ///
    /// let a = CharacterKey::new("HuTao");
    /// let b: CharacterKey = "HuTao".into();
    /// assert_eq!(a, b);
    /// ```
    CharacterKey
);

string_key!(
    /// A weapon, e.g. `"StaffofHoma"`.
    WeaponKey
);

string_key!(
    /// An artifact set, e.g. `"CrimsonWitchOfFlames"`.
    ArtifactSetKey
);
