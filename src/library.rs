//! The build library.
//!
//! Builds are stored one per key under a common prefix, next to a single
//! imported GOOD database. Backups (format `"GBM"`) carry every build in
//! one document.

use crate::aggregate::{build_stat_sheet, StatSheet};
use crate::build::Build;
use crate::config::LibraryConfig;
use crate::data::GameData;
use crate::database::{check_format, Database};
use crate::error::StoreError;
use crate::store::{KeyValueStore, StoreOp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Format tag of build backups.
pub const GBM_FORMAT: &str = "GBM";

/// Turn a build label into its storage key.
///
/// Letters are lowercased and everything that is not a letter or digit is
/// dropped.
///
/// # Examples
///
/// ```rust
/// use buildstat::sanitize_store_key;
///
/// assert_eq!(sanitize_store_key("Hu Tao - Vape!"), "hutaovape");
/// assert_eq!(sanitize_store_key("Hu Tao Copy 2"), "hutaocopy2");
/// assert_eq!(sanitize_store_key("  ?? "), "");
/// ```
pub fn sanitize_store_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A backup document: every build keyed by its sanitized label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub format: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub builds: BTreeMap<String, Build>,
}

/// Saved builds plus the database they point into.
///
/// # Examples
///
/// ```rust
/// use buildstat::{Build, BuildLibrary, MemoryStore};
///
/// let mut library = BuildLibrary::new(MemoryStore::new());
/// library
///     .save(&Build::new("Hu Tao Vape").with_character("HuTao"), None)
///     .unwrap();
///
/// let loaded = library.load("hu tao vape").unwrap().unwrap();
/// assert_eq!(loaded.label, "Hu Tao Vape");
/// ```
#[derive(Debug)]
pub struct BuildLibrary<S> {
    store: S,
    config: LibraryConfig,
}

impl<S: KeyValueStore> BuildLibrary<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LibraryConfig::default())
    }

    pub fn with_config(store: S, config: LibraryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn build_key(&self, label: &str) -> String {
        format!("{}{}", self.config.build_prefix, sanitize_store_key(label))
    }

    fn build_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.config.build_prefix))
            .collect())
    }

    fn read_build(&self, key: &str) -> Result<Option<Build>, StoreError> {
        match self.store.get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Check a build can be stored and return its key.
    fn checked_key(&self, build: &Build) -> Result<String, StoreError> {
        if build.character.is_none() {
            return Err(StoreError::MissingCharacter);
        }
        if sanitize_store_key(&build.label).is_empty() {
            return Err(StoreError::MissingLabel);
        }
        Ok(self.build_key(&build.label))
    }

    /// Save `build` under its sanitized label and return the key used.
    ///
    /// A build without a character or without a label is rejected and
    /// nothing is written. When `previous_label` maps to a different key the
    /// old entry is removed in the same write, so a rename never leaves a
    /// stale copy behind.
    ///
    /// Distinct labels can sanitize to the same key. Saving over a build
    /// with a different label fails with [`StoreError::KeyTaken`], unless
    /// that build is the one being renamed.
    pub fn save(
        &mut self,
        build: &Build,
        previous_label: Option<&str>,
    ) -> Result<String, StoreError> {
        let key = self.checked_key(build)?;
        let old_key = previous_label.map(|previous| self.build_key(previous));

        if old_key.as_deref() != Some(key.as_str()) {
            if let Some(existing) = self.read_build(&key)? {
                if existing.label != build.label {
                    return Err(StoreError::KeyTaken {
                        label: build.label.clone(),
                        existing: existing.label,
                        key,
                    });
                }
            }
        }

        let mut ops = vec![StoreOp::Set(key.clone(), serde_json::to_string(build)?)];
        if let Some(old_key) = old_key.filter(|old| *old != key) {
            tracing::debug!(from = %old_key, to = %key, "renaming build");
            ops.push(StoreOp::Remove(old_key));
        }
        self.store.apply(ops)?;

        tracing::debug!(%key, "saved build");
        Ok(key)
    }

    pub fn load(&self, label: &str) -> Result<Option<Build>, StoreError> {
        let key = self.build_key(label);
        let build = self.read_build(&key)?;
        tracing::debug!(%key, found = build.is_some(), "loaded build");
        Ok(build)
    }

    pub fn delete(&mut self, label: &str) -> Result<(), StoreError> {
        let key = self.build_key(label);
        self.store.remove(&key)?;
        tracing::debug!(%key, "deleted build");
        Ok(())
    }

    /// Every saved build, sorted by label.
    pub fn builds(&self) -> Result<Vec<Build>, StoreError> {
        let mut builds = Vec::new();
        for key in self.build_keys()? {
            if let Some(build) = self.read_build(&key)? {
                builds.push(build);
            }
        }
        builds.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(builds)
    }

    /// Builds whose label contains `text`, ignoring case.
    pub fn filter(&self, text: &str) -> Result<Vec<Build>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self
            .builds()?
            .into_iter()
            .filter(|build| build.label.to_lowercase().contains(&needle))
            .collect())
    }

    /// Copy a saved build under the next free `<key>copy<N>`.
    ///
    /// The copy is labelled `"<label> Copy <N>"`, which sanitizes back to
    /// the same key.
    pub fn duplicate(&mut self, label: &str) -> Result<Build, StoreError> {
        let original = self
            .load(label)?
            .ok_or_else(|| StoreError::NotFound(label.to_string()))?;

        let stem = format!(
            "{}{}copy",
            self.config.build_prefix,
            sanitize_store_key(&original.label)
        );
        let taken: BTreeSet<u32> = self
            .build_keys()?
            .iter()
            .filter_map(|key| key.strip_prefix(&stem))
            .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|rest| rest.parse().ok())
            .collect();
        let n = (1..).find(|n| !taken.contains(n)).unwrap_or(1);

        let copy_label = format!("{} Copy {}", original.label, n);
        let copy = original.with_label(copy_label);
        let key = self.save(&copy, None)?;
        tracing::debug!(%key, "duplicated build");
        Ok(copy)
    }

    /// Serialize every build into one `"GBM"` document.
    pub fn export_backup(&self) -> Result<String, StoreError> {
        let mut builds = BTreeMap::new();
        for key in self.build_keys()? {
            if let Some(build) = self.read_build(&key)? {
                let name = key[self.config.build_prefix.len()..].to_string();
                builds.insert(name, build);
            }
        }
        tracing::debug!(builds = builds.len(), "exported backup");

        let backup = Backup {
            format: GBM_FORMAT.to_string(),
            version: self.config.backup_version,
            builds,
        };
        Ok(serde_json::to_string(&backup)?)
    }

    /// Replace every saved build with the builds in a `"GBM"` document.
    ///
    /// Each build is stored under the key its own label maps to, so it can
    /// be loaded by label afterwards. The document is fully parsed and every
    /// build checked as [`save`](Self::save) would before anything is
    /// touched. The replacement is one batch, so a store that commits
    /// batches atomically never shows a half-imported library.
    pub fn import_backup(&mut self, json: &str) -> Result<usize, StoreError> {
        let document: Value = serde_json::from_str(json)?;
        check_format(&document, GBM_FORMAT)?;
        let backup: Backup = serde_json::from_value(document)?;

        let mut incoming: BTreeMap<String, &Build> = BTreeMap::new();
        for build in backup.builds.values() {
            let key = self.checked_key(build)?;
            if let Some(first) = incoming.insert(key.clone(), build) {
                return Err(StoreError::DuplicateKey {
                    first: first.label.clone(),
                    second: build.label.clone(),
                    key,
                });
            }
        }

        let mut ops: Vec<StoreOp> = self
            .build_keys()?
            .into_iter()
            .filter(|key| !incoming.contains_key(key))
            .map(StoreOp::Remove)
            .collect();
        for (key, build) in &incoming {
            ops.push(StoreOp::Set(key.clone(), serde_json::to_string(build)?));
        }
        self.store.apply(ops)?;

        tracing::debug!(builds = incoming.len(), "imported backup");
        Ok(incoming.len())
    }

    /// Store a `"GOOD"` database, replacing the previous one.
    ///
    /// Saved builds refer to the old inventory, so they are all removed in
    /// the same batch that stores the database.
    pub fn import_database(&mut self, json: &str) -> Result<Database, StoreError> {
        let database = Database::from_json(json)?;
        let stale = self.build_keys()?;
        let cleared = stale.len();

        let mut ops = vec![StoreOp::Set(
            self.config.database_key.clone(),
            database.to_json()?,
        )];
        ops.extend(stale.into_iter().map(StoreOp::Remove));
        self.store.apply(ops)?;

        tracing::debug!(
            characters = database.characters.len(),
            artifacts = database.artifacts.len(),
            weapons = database.weapons.len(),
            cleared,
            "imported database"
        );
        Ok(database)
    }

    /// The imported database, if any.
    pub fn database(&self) -> Result<Option<Database>, StoreError> {
        match self.store.get(&self.config.database_key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a build and compute its stat sheet against the stored database.
    ///
    /// With no database imported every reference in the build is dangling.
    pub fn sheet<D: GameData + ?Sized>(
        &self,
        data: &D,
        label: &str,
    ) -> Result<StatSheet, StoreError> {
        let build = self
            .load(label)?
            .ok_or_else(|| StoreError::NotFound(label.to_string()))?;
        let database = self.database()?.unwrap_or_default();
        let loadout = database.resolve(&build);
        Ok(build_stat_sheet(data, &loadout)?)
    }
}
