//! Test plan generation.
//!
//! Filters the impact closure down to test classes and produces a
//! deterministic ordering so repeated runs over identical input emit a
//! byte-identical plan.

use crate::model::{ClassId, TestPlan};
use std::collections::HashSet;

/// Classifies a class as a test class versus a production class.
///
/// Injected by host configuration; the planner hardcodes no convention.
pub trait TestClassPredicate {
    fn is_test_class(&self, class: &ClassId) -> bool;
}

impl<F> TestClassPredicate for F
where
    F: Fn(&ClassId) -> bool,
{
    fn is_test_class(&self, class: &ClassId) -> bool {
        self(class)
    }
}

/// Name-based rules matched against the simple (outer) class name, using
/// a single `*` wildcard per pattern: `Test*`, `*Test`, `Test*Case`, or an
/// exact name.
#[derive(Debug, Clone)]
pub struct NamePatterns {
    patterns: Vec<String>,
}

impl NamePatterns {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// The Surefire naming conventions most JVM builds follow.
    pub fn surefire_defaults() -> Self {
        Self::new(
            ["Test*", "*Test", "*Tests", "*TestCase"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl Default for NamePatterns {
    fn default() -> Self {
        Self::surefire_defaults()
    }
}

impl TestClassPredicate for NamePatterns {
    fn is_test_class(&self, class: &ClassId) -> bool {
        let simple = class.simple_name();
        // Nested classes inherit the outer class's classification.
        let outer = simple.split('$').next().unwrap_or(simple);
        self.patterns
            .iter()
            .any(|pattern| wildcard_match(pattern, outer))
    }
}

fn wildcard_match(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == name,
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
    }
}

/// Filter `impacted` through the predicate, deduplicate, and order
/// lexicographically by fully-qualified name. Impacted classes that are
/// not tests are silently excluded.
pub fn generate_plan(
    impacted: &HashSet<ClassId>,
    predicate: &dyn TestClassPredicate,
) -> TestPlan {
    let mut tests: Vec<ClassId> = impacted
        .iter()
        .filter(|class| predicate.is_test_class(class))
        .cloned()
        .collect();
    tests.sort();
    tests.dedup();
    TestPlan::new(tests)
}
