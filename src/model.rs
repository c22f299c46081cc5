//! Core data model: class identifiers, dependency edges, change sets,
//! and the test execution plan handed back to the host build.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Fully-qualified binary name of a compiled class, e.g. `com.example.App`.
///
/// Used as a graph node key and map key; equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unqualified class name: the text after the last package separator.
    /// `com.example.AppTest$Inner` yields `AppTest$Inner`.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A parsed dependency fact: `from` references `to` at the bytecode level.
///
/// The parser may emit duplicates; the graph deduplicates on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub from: ClassId,
    pub to: ClassId,
}

/// Classes known to have changed since the last good build. Pure input:
/// nothing in this crate infers membership.
pub type ChangeSet = HashSet<ClassId>;

/// Ordered, duplicate-free list of test classes selected for execution.
/// An empty plan is valid and means "no tests impacted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestPlan {
    classes: Vec<ClassId>,
}

impl TestPlan {
    /// Callers must supply an already sorted, deduplicated list; see
    /// [`crate::plan::generate_plan`].
    pub fn new(classes: Vec<ClassId>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassId> {
        self.classes.iter()
    }
}

/// Outcome of one planning run, serialized for the host build system.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanReport {
    pub plan: TestPlan,
    /// True when analysis failed and the configured policy chose the
    /// conservative full-suite fallback instead of aborting.
    pub run_all_tests: bool,
    /// True when the analyzer ran but its output yielded no usable
    /// dependency facts, so the plan may be under-inclusive.
    pub degraded: bool,
    pub changed_classes: usize,
    pub impacted_classes: usize,
    pub parsed_edges: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub analysis_ms: u64,
    pub pipeline_ms: u64,
}

impl PlanReport {
    /// Fallback report: no selection was possible, run the full suite.
    pub fn run_all() -> Self {
        Self {
            run_all_tests: true,
            ..Self::default()
        }
    }
}
