//! revtest — selective test planning for JVM modules.
//!
//! Runs a bytecode dependency analyzer (`jdeps`) over a module's compiled
//! classes, builds a class dependency graph from its output, inverts the
//! graph to find every test class transitively depending on a set of
//! changed classes, and emits a deterministic test execution plan.
//!
//! Pipeline: analyzer invocation → [`jdeps::parser`] → [`graph`] →
//! [`impact`] → [`plan`], sequenced by [`orchestrator`].

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod impact;
pub mod jdeps;
pub mod model;
pub mod orchestrator;
pub mod plan;
pub mod util;
