//! In-memory class dependency graph.
//!
//! Holds a forward index (what each class references) and a symmetric
//! reverse index (who references each class). Every inserted edge is
//! present in both. Cycles are legal and common via interface and
//! implementation pairs; nothing here assumes a DAG.

use crate::model::{ClassId, DependencyEdge};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    outgoing: HashMap<ClassId, HashSet<ClassId>>,
    incoming: HashMap<ClassId, HashSet<ClassId>>,
    edge_count: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }

    /// Insert a directed edge. Idempotent: re-inserting an existing edge
    /// has no effect. Self-references are stored; traversal ignores them.
    pub fn add_edge(&mut self, from: ClassId, to: ClassId) {
        let inserted = self
            .outgoing
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        if inserted {
            self.incoming.entry(to).or_default().insert(from);
            self.edge_count += 1;
        }
    }

    /// Classes that `node` references. Empty for unknown nodes: an absent
    /// node has no known edges, it is not an error.
    pub fn outgoing(&self, node: &ClassId) -> impl Iterator<Item = &ClassId> {
        self.outgoing.get(node).into_iter().flatten()
    }

    /// Classes that reference `node`. Empty for unknown nodes.
    pub fn incoming(&self, node: &ClassId) -> impl Iterator<Item = &ClassId> {
        self.incoming.get(node).into_iter().flatten()
    }

    pub fn contains(&self, node: &ClassId) -> bool {
        self.outgoing.contains_key(node) || self.incoming.contains_key(node)
    }

    pub fn has_edge(&self, from: &ClassId, to: &ClassId) -> bool {
        self.outgoing.get(from).is_some_and(|tos| tos.contains(to))
    }

    /// All classes appearing as either endpoint of some edge.
    pub fn nodes(&self) -> HashSet<&ClassId> {
        self.outgoing.keys().chain(self.incoming.keys()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Union another graph's edges into this one. Module analyses are
    /// independent, so a multi-module build merges at the edge-set level.
    pub fn merge(&mut self, other: DependencyGraph) {
        for (from, tos) in other.outgoing {
            for to in tos {
                self.add_edge(from.clone(), to);
            }
        }
    }
}
