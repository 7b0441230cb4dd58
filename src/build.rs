//! Build records.
//!
//! A build is a value: edits go through the consuming `with_*` methods and
//! produce a new build, so a stored build is never partially changed.

use crate::artifact::{Artifact, ArtifactId, SlotKey};
use crate::keys::CharacterKey;
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};

/// Artifact references for the five slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flower: Option<ArtifactId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plume: Option<ArtifactId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sands: Option<ArtifactId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goblet: Option<ArtifactId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circlet: Option<ArtifactId>,
}

impl BuildArtifacts {
    pub fn get(&self, slot: SlotKey) -> Option<&ArtifactId> {
        match slot {
            SlotKey::Flower => self.flower.as_ref(),
            SlotKey::Plume => self.plume.as_ref(),
            SlotKey::Sands => self.sands.as_ref(),
            SlotKey::Goblet => self.goblet.as_ref(),
            SlotKey::Circlet => self.circlet.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: SlotKey) -> &mut Option<ArtifactId> {
        match slot {
            SlotKey::Flower => &mut self.flower,
            SlotKey::Plume => &mut self.plume,
            SlotKey::Sands => &mut self.sands,
            SlotKey::Goblet => &mut self.goblet,
            SlotKey::Circlet => &mut self.circlet,
        }
    }

    /// Iterate the filled slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &ArtifactId)> + '_ {
        SlotKey::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|id| (slot, id)))
    }
}

/// A saved combination of character, weapon and artifacts.
///
/// The weapon is embedded by value; artifacts are referenced by
/// [`ArtifactId`].
///
/// # Examples
///
/// ```rust
/// use buildstat::{Artifact, Build, SlotKey, StatKey};
///
/// let flower = Artifact::new("GladiatorsFinale", SlotKey::Flower, 5, 20, StatKey::Hp);
/// let build = Build::new("Main DPS")
///     .with_character("Diluc")
///     .with_artifact(&flower);
///
/// assert_eq!(build.artifacts.get(SlotKey::Flower), Some(&flower.id()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub artifacts: BuildArtifacts,
}

impl Build {
    /// An empty build with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_character(mut self, character: impl Into<CharacterKey>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn with_weapon(mut self, weapon: Option<Weapon>) -> Self {
        self.weapon = weapon;
        self
    }

    /// Equip `artifact` in its own slot, replacing whatever was there.
    pub fn with_artifact(mut self, artifact: &Artifact) -> Self {
        *self.artifacts.slot_mut(artifact.slot_key) = Some(artifact.id());
        self
    }

    pub fn without_artifact(mut self, slot: SlotKey) -> Self {
        *self.artifacts.slot_mut(slot) = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_key::StatKey;

    #[test]
    fn test_with_artifact_uses_its_slot() {
        let goblet = Artifact::new("Set", SlotKey::Goblet, 5, 20, StatKey::PyroDamage);
        let build = Build::new("b").with_artifact(&goblet);
        assert_eq!(build.artifacts.goblet, Some(goblet.id()));
        assert_eq!(build.artifacts.iter().count(), 1);
    }

    #[test]
    fn test_without_artifact_clears_slot() {
        let flower = Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp);
        let build = Build::new("b")
            .with_artifact(&flower)
            .without_artifact(SlotKey::Flower);
        assert_eq!(build.artifacts, BuildArtifacts::default());
    }

    #[test]
    fn test_serialized_shape() {
        let flower = Artifact::new("Set", SlotKey::Flower, 5, 20, StatKey::Hp);
        let build = Build::new("Hu Tao").with_character("HuTao").with_artifact(&flower);
        let json = serde_json::to_value(&build).unwrap();
        assert_eq!(json["label"], "Hu Tao");
        assert_eq!(json["character"], "HuTao");
        assert_eq!(json["artifacts"]["flower"], flower.id().as_str());
        assert!(json["artifacts"].get("plume").is_none());
        assert!(json.get("weapon").is_none());
    }
}
