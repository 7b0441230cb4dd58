//! Stat resolver module.
//!
//! Provides the `StatResolver` type, which sums each stat node's sources,
//! orders nodes by their transform dependencies, and applies transforms.
//! A resolver borrows the equipment it reads from and is meant to be built
//! for one computation and dropped.

use crate::error::StatError;
use crate::graph::StatGraph;
use crate::resolved::ResolvedStat;
use crate::source::StatSource;
use crate::stat_key::StatKey;
use crate::transform::StatTransform;
use std::collections::{BTreeMap, HashMap};

/// Coordinates stat resolution:
/// 1. Collects sources (additive)
/// 2. Builds the dependency graph from transforms
/// 3. Detects cycles
/// 4. Resolves stats in topological order, caching each result
///
/// # Examples
///
/// ```rust
/// use buildstat::resolver::StatResolver;
/// use buildstat::source::ConstantSource;
/// use buildstat::transform::{AddStatTransform, ScaleByBaseTransform};
/// use buildstat::StatKey;
///
/// let mut resolver = StatResolver::new();
/// resolver.register_source(StatKey::AtkPercent, Box::new(ConstantSource::new("Sands", 20.0)));
/// resolver.register_transform(
///     StatKey::AtkPercent,
///     Box::new(ScaleByBaseTransform::new(Some(1100.0))),
/// );
/// resolver.register_source(StatKey::Atk, Box::new(ConstantSource::new("Plume", 50.0)));
/// resolver.register_transform(StatKey::Atk, Box::new(AddStatTransform::new(StatKey::AtkPercent)));
///
/// let atk = resolver.resolve(StatKey::Atk).unwrap();
/// assert_eq!(atk.value, 270.0);
/// ```
#[derive(Default)]
pub struct StatResolver<'a> {
    /// Multiple sources per stat (additive).
    sources: HashMap<StatKey, Vec<Box<dyn StatSource + 'a>>>,

    /// Transform chain per stat, in registration order.
    transforms: HashMap<StatKey, Vec<Box<dyn StatTransform + 'a>>>,

    cache: HashMap<StatKey, ResolvedStat>,
}

impl<'a> StatResolver<'a> {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            transforms: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Register a source for a stat. Sources for one stat are summed.
    pub fn register_source(&mut self, stat: StatKey, source: Box<dyn StatSource + 'a>) {
        self.sources.entry(stat).or_default().push(source);
        self.cache.clear();
    }

    /// Register a transform for a stat. Transforms apply in registration order.
    pub fn register_transform(&mut self, stat: StatKey, transform: Box<dyn StatTransform + 'a>) {
        self.transforms.entry(stat).or_default().push(transform);
        self.cache.clear();
    }

    /// Resolve a single stat and everything it depends on.
    ///
    /// A stat with nothing registered resolves to zero.
    pub fn resolve(&mut self, stat: StatKey) -> Result<ResolvedStat, StatError> {
        if let Some(cached) = self.cache.get(&stat) {
            return Ok(cached.clone());
        }

        self.resolve_pending()?;

        Ok(self.cache.get(&stat).cloned().unwrap_or_else(|| {
            let mut resolved = ResolvedStat::new(stat, 0.0);
            resolved.add_source("Default", 0.0);
            resolved
        }))
    }

    /// Resolve every registered stat.
    pub fn resolve_all(&mut self) -> Result<BTreeMap<StatKey, ResolvedStat>, StatError> {
        self.resolve_pending()?;
        Ok(self
            .cache
            .iter()
            .map(|(stat, resolved)| (*stat, resolved.clone()))
            .collect())
    }

    fn resolve_pending(&mut self) -> Result<(), StatError> {
        let graph = self.build_graph();
        for stat in graph.topological_sort()? {
            if self.cache.contains_key(&stat) {
                continue;
            }
            let resolved = self.resolve_stat_internal(stat)?;
            self.cache.insert(stat, resolved);
        }
        Ok(())
    }

    fn build_graph(&self) -> StatGraph {
        let mut graph = StatGraph::new();

        for stat in self.sources.keys().chain(self.transforms.keys()) {
            graph.add_node(*stat);
        }

        for (stat, transforms) in &self.transforms {
            for transform in transforms {
                for dep in transform.depends_on() {
                    graph.add_edge(*stat, dep);
                }
            }
        }

        graph
    }

    fn resolve_stat_internal(&self, stat: StatKey) -> Result<ResolvedStat, StatError> {
        let mut resolved = ResolvedStat::new(stat, 0.0);

        // Sources are additive
        let mut value = 0.0;
        match self.sources.get(&stat) {
            Some(sources) => {
                for source in sources {
                    let contribution = source.get_value(stat)?;
                    value += contribution;
                    resolved.add_source(source.description(), contribution);
                }
            }
            None => resolved.add_source("Default", 0.0),
        }

        if let Some(transforms) = self.transforms.get(&stat) {
            for transform in transforms {
                let mut dependencies = HashMap::new();
                for dep in transform.depends_on() {
                    let dep_value = self
                        .cache
                        .get(&dep)
                        .map(|r| r.value)
                        .ok_or(StatError::MissingDependency(dep))?;
                    dependencies.insert(dep, dep_value);
                }

                value = transform.apply(value, &dependencies)?;
                resolved.add_transform(transform.description(), value);
            }
        }

        resolved.value = value;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConstantSource;
    use crate::transform::{AddStatTransform, ScaleByBaseTransform};

    #[test]
    fn test_resolve_multiple_sources() {
        let mut resolver = StatResolver::new();
        resolver.register_source(StatKey::Hp, Box::new(ConstantSource::new("a", 100.0)));
        resolver.register_source(StatKey::Hp, Box::new(ConstantSource::new("b", 50.0)));

        let resolved = resolver.resolve(StatKey::Hp).unwrap();
        assert_eq!(resolved.value, 150.0);
        assert_eq!(resolved.sources.len(), 2);
    }

    #[test]
    fn test_resolve_unregistered_is_zero() {
        let mut resolver = StatResolver::new();
        let resolved = resolver.resolve(StatKey::CritRate).unwrap();
        assert_eq!(resolved.value, 0.0);
        assert_eq!(resolved.sources, vec![("Default".to_string(), 0.0)]);
    }

    #[test]
    fn test_dependency_resolved_first() {
        let mut resolver = StatResolver::new();
        // Registered flat-first to make sure order comes from the graph
        resolver.register_source(StatKey::Def, Box::new(ConstantSource::new("flat", 10.0)));
        resolver.register_transform(
            StatKey::Def,
            Box::new(AddStatTransform::new(StatKey::DefPercent)),
        );
        resolver.register_source(StatKey::DefPercent, Box::new(ConstantSource::new("pct", 50.0)));
        resolver.register_transform(
            StatKey::DefPercent,
            Box::new(ScaleByBaseTransform::new(Some(800.0))),
        );

        let all = resolver.resolve_all().unwrap();
        assert_eq!(all[&StatKey::DefPercent].value, 400.0);
        assert_eq!(all[&StatKey::Def].value, 410.0);
        assert_eq!(all[&StatKey::Def].transforms.len(), 1);
    }

    #[test]
    fn test_cycle_is_error() {
        let mut resolver = StatResolver::new();
        resolver.register_transform(
            StatKey::Atk,
            Box::new(AddStatTransform::new(StatKey::AtkPercent)),
        );
        resolver.register_transform(
            StatKey::AtkPercent,
            Box::new(AddStatTransform::new(StatKey::Atk)),
        );

        assert!(matches!(
            resolver.resolve(StatKey::Atk),
            Err(StatError::Cycle { .. })
        ));
    }

    #[test]
    fn test_registration_clears_cache() {
        let mut resolver = StatResolver::new();
        resolver.register_source(StatKey::Hp, Box::new(ConstantSource::new("a", 100.0)));
        assert_eq!(resolver.resolve(StatKey::Hp).unwrap().value, 100.0);

        resolver.register_source(StatKey::Hp, Box::new(ConstantSource::new("b", 50.0)));
        assert_eq!(resolver.resolve(StatKey::Hp).unwrap().value, 150.0);
    }
}
