//! Dependency graph module.
//!
//! Provides the `StatGraph` type, which represents dependencies between
//! stat nodes as a directed acyclic graph. Used by the resolver to fold
//! percentage nodes into their flat counterparts in the right order.

use crate::error::StatError;
use crate::stat_key::StatKey;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// A DAG of stat dependencies.
///
/// If stat A depends on stat B, B must be resolved before A.
///
/// # Examples
///
/// ```rust
/// use buildstat::graph::StatGraph;
/// use buildstat::StatKey;
///
/// let mut graph = StatGraph::new();
///
/// // ATK depends on ATK%
/// graph.add_edge(StatKey::Atk, StatKey::AtkPercent);
///
/// let order = graph.topological_sort().unwrap();
/// let pct = order.iter().position(|k| *k == StatKey::AtkPercent).unwrap();
/// let flat = order.iter().position(|k| *k == StatKey::Atk).unwrap();
/// assert!(pct < flat);
/// ```
#[derive(Default)]
pub struct StatGraph {
    graph: DiGraph<StatKey, ()>,
    node_map: HashMap<StatKey, NodeIndex>,
}

impl StatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if it doesn't exist and return its index.
    pub fn add_node(&mut self, stat: StatKey) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&stat) {
            idx
        } else {
            let idx = self.graph.add_node(stat);
            self.node_map.insert(stat, idx);
            idx
        }
    }

    /// `from` depends on `to` (`to` must be resolved before `from`).
    ///
    /// Both nodes are added if missing.
    pub fn add_edge(&mut self, from: StatKey, to: StatKey) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(to_idx, from_idx, ());
    }

    /// Report the first cycle found, if any.
    ///
    /// Cycles are found as strongly connected components; the reported
    /// path is the shortest loop through one member, closed on that member.
    pub fn detect_cycles(&self) -> Result<(), StatError> {
        for component in tarjan_scc(&self.graph) {
            let start = component[0];
            if component.len() > 1 || self.graph.contains_edge(start, start) {
                let members: HashSet<NodeIndex> = component.iter().copied().collect();
                return Err(StatError::Cycle {
                    path: self.loop_through(start, &members),
                });
            }
        }
        Ok(())
    }

    /// Breadth-first walk from `start` back to itself inside `members`.
    fn loop_through(&self, start: NodeIndex, members: &HashSet<NodeIndex>) -> Vec<StatKey> {
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors(node) {
                if next == start {
                    let mut back = vec![self.graph[node]];
                    let mut current = node;
                    while let Some(&prev) = parent.get(&current) {
                        back.push(self.graph[prev]);
                        current = prev;
                    }
                    // `back` ends at start when node != start
                    if node == start {
                        back.clear();
                    } else {
                        back.pop();
                    }
                    back.reverse();

                    let mut path = vec![self.graph[start]];
                    path.extend(back);
                    path.push(self.graph[start]);
                    return path;
                }
                if members.contains(&next) && !parent.contains_key(&next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        vec![self.graph[start]]
    }

    /// Resolution order: dependencies before dependents.
    pub fn topological_sort(&self) -> Result<Vec<StatKey>, StatError> {
        self.detect_cycles()?;

        match toposort(&self.graph, None) {
            Ok(indices) => Ok(indices.into_iter().map(|idx| self.graph[idx]).collect()),
            Err(cycle) => Err(StatError::Cycle {
                path: vec![self.graph[cycle.node_id()]],
            }),
        }
    }

    pub fn nodes(&self) -> Vec<StatKey> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx])
            .collect()
    }

    pub fn contains_node(&self, stat: StatKey) -> bool {
        self.node_map.contains_key(&stat)
    }
}
