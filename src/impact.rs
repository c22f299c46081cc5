//! Change-impact resolution.
//!
//! Answers "which classes must be re-verified if these changed?" by
//! breadth-first traversal over the reverse dependency index: from each
//! changed class, walk to the classes that reference it, transitively.
//! The result is a set; traversal order never affects membership.

use crate::graph::DependencyGraph;
use crate::model::{ChangeSet, ClassId};
use std::collections::{HashSet, VecDeque};

/// All classes transitively depending on any member of `changed`, plus the
/// changed classes themselves.
///
/// A changed class absent from the graph is still included: it changed, so
/// by definition it is impacted, it just has no recorded dependents yet.
/// The visited set makes the walk cycle-safe and each node is expanded at
/// most once, so the cost is linear in edges visited.
pub fn resolve_impact(graph: &DependencyGraph, changed: &ChangeSet) -> HashSet<ClassId> {
    let mut visited: HashSet<ClassId> = HashSet::new();
    let mut queue: VecDeque<ClassId> = VecDeque::new();

    for seed in changed {
        if visited.insert(seed.clone()) {
            queue.push_back(seed.clone());
        }
    }

    while let Some(current) = queue.pop_front() {
        for dependent in graph.incoming(&current) {
            if visited.insert(dependent.clone()) {
                queue.push_back(dependent.clone());
            }
        }
    }

    visited
}
