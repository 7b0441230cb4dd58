//! Stat transforms module.
//!
//! Transforms modify a stat node's value after its sources are summed.
//! Transforms can read other stats (dependencies) and must declare them
//! explicitly via `depends_on()` so the resolver can order them.

use crate::error::StatError;
use crate::stat_key::StatKey;
use std::collections::HashMap;

/// Trait for transforms applied to a stat node.
pub trait StatTransform {
    /// Stats that must be resolved before this transform is applied.
    fn depends_on(&self) -> Vec<StatKey>;

    /// Apply the transform to an input value.
    ///
    /// # Arguments
    ///
    /// * `input` - The current value (after sources and earlier transforms)
    /// * `dependencies` - Resolved values of the stats in `depends_on()`
    fn apply(&self, input: f64, dependencies: &HashMap<StatKey, f64>) -> Result<f64, StatError>;

    /// Human-readable description for the resolved breakdown.
    fn description(&self) -> String;
}

/// Convert percentage points into a flat bonus against a base stat.
///
/// `input / 100 * base`. Without a base (no character) the multiplier is
/// 1, so the result equals the raw points divided by 100.
///
/// # Examples
///
/// ```rust
/// use buildstat::transform::{ScaleByBaseTransform, StatTransform};
/// use std::collections::HashMap;
///
/// let transform = ScaleByBaseTransform::new(Some(1100.0));
/// let value = transform.apply(20.0, &HashMap::new()).unwrap();
/// assert_eq!(value, 220.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScaleByBaseTransform {
    base: Option<f64>,
}

impl ScaleByBaseTransform {
    pub fn new(base: Option<f64>) -> Self {
        Self { base }
    }

    pub fn multiplier(&self) -> f64 {
        self.base.unwrap_or(1.0)
    }
}

impl StatTransform for ScaleByBaseTransform {
    fn depends_on(&self) -> Vec<StatKey> {
        Vec::new()
    }

    fn apply(&self, input: f64, _dependencies: &HashMap<StatKey, f64>) -> Result<f64, StatError> {
        Ok(input / 100.0 * self.multiplier())
    }

    fn description(&self) -> String {
        match self.base {
            Some(base) => format!("% of base {:.2}", base),
            None => String::from("% of base (no character)"),
        }
    }
}

/// Add another stat's resolved value, e.g. the ATK% bonus into ATK.
#[derive(Debug, Clone, Copy)]
pub struct AddStatTransform {
    dependency: StatKey,
}

impl AddStatTransform {
    pub fn new(dependency: StatKey) -> Self {
        Self { dependency }
    }
}

impl StatTransform for AddStatTransform {
    fn depends_on(&self) -> Vec<StatKey> {
        vec![self.dependency]
    }

    fn apply(&self, input: f64, dependencies: &HashMap<StatKey, f64>) -> Result<f64, StatError> {
        let bonus = dependencies
            .get(&self.dependency)
            .copied()
            .ok_or(StatError::MissingDependency(self.dependency))?;
        Ok(input + bonus)
    }

    fn description(&self) -> String {
        format!("+ {}", self.dependency)
    }
}
