//! Resolved stat results module.
//!
//! Contains the `ResolvedStat` type: a final stat value together with the
//! breakdown of sources and transforms that produced it.

use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

/// A resolved stat value with full breakdown information.
///
/// # Examples
///
/// ```rust
/// use buildstat::{ResolvedStat, StatKey};
///
/// let mut resolved = ResolvedStat::new(StatKey::Atk, 270.0);
/// resolved.add_source("Artifacts (5)", 50.0);
/// resolved.add_source("Weapon (none)", 0.0);
/// resolved.add_transform("+ atk_", 270.0);
///
/// assert_eq!(resolved.sources.len(), 2);
/// assert_eq!(resolved.transforms.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStat {
    pub stat: StatKey,

    /// The final resolved value.
    pub value: f64,

    /// `(source_description, value)` in registration order.
    pub sources: Vec<(String, f64)>,

    /// `(transform_description, value_after_transform)` in application order.
    pub transforms: Vec<(String, f64)>,
}

impl ResolvedStat {
    pub fn new(stat: StatKey, value: f64) -> Self {
        Self {
            stat,
            value,
            sources: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn add_source(&mut self, description: impl Into<String>, value: f64) {
        self.sources.push((description.into(), value));
    }

    pub fn add_transform(&mut self, description: impl Into<String>, value: f64) {
        self.transforms.push((description.into(), value));
    }

    /// Sum of the source contributions, before any transform.
    pub fn source_total(&self) -> f64 {
        self.sources.iter().fold(0.0, |acc, (_, value)| acc + value)
    }
}
