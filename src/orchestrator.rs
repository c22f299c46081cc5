//! Pipeline orchestration.
//!
//! Per module: discover the analyzer, invoke it over the compiled class
//! directories, parse its output, and fold the edges into one graph. Then
//! resolve the impact closure from the change set and generate the plan.
//! Wall-clock duration of the analysis step and of the full pipeline is
//! recorded for the host's logs.
//!
//! Failure policy is fail-safe: any stage error aborts with a diagnostic
//! rather than silently selecting too few tests. The conservative
//! "run everything instead" fallback is a host decision, applied by the
//! CLI layer on top of the error this module returns.

use crate::error::ToolError;
use crate::graph::DependencyGraph;
use crate::impact::resolve_impact;
use crate::jdeps::{
    CancelToken, EnvDiscovery, JdepsInvocation, ProcessRunner, ToolDiscovery, ToolRunner,
    parse_dependencies, run_analysis,
};
use crate::model::{ChangeSet, PlanReport};
use crate::plan::{NamePatterns, TestClassPredicate, generate_plan};
use anyhow::{Result, bail};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Compiled-output locations for one module.
#[derive(Debug, Clone)]
pub struct ModulePaths {
    pub classes_dir: PathBuf,
    pub test_classes_dir: PathBuf,
}

/// Host-facing configuration for one planning run.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub modules: Vec<ModulePaths>,
    /// Explicit analyzer location; discovery probes the environment when
    /// unset.
    pub jdeps_path: Option<PathBuf>,
    /// Escalate a fact-free analysis to a hard failure instead of a
    /// degraded-plan warning.
    pub strict_parse: bool,
}

pub struct Orchestrator {
    config: PlanConfig,
    discovery: Box<dyn ToolDiscovery>,
    runner: Box<dyn ToolRunner>,
    predicate: Box<dyn TestClassPredicate>,
}

impl Orchestrator {
    pub fn new(config: PlanConfig) -> Self {
        let discovery = Box::new(EnvDiscovery::new(config.jdeps_path.clone()));
        Self {
            config,
            discovery,
            runner: Box::new(ProcessRunner),
            predicate: Box::new(NamePatterns::surefire_defaults()),
        }
    }

    pub fn with_runner(mut self, runner: Box<dyn ToolRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_discovery(mut self, discovery: Box<dyn ToolDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_predicate(mut self, predicate: Box<dyn TestClassPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Run the full pipeline for the configured modules.
    pub fn run(&self, changed: &ChangeSet, cancel: &CancelToken) -> Result<PlanReport> {
        let pipeline_start = Instant::now();

        let mut graph = DependencyGraph::new();
        let mut parsed_edges = 0usize;
        let mut analysis_ms = 0u64;
        let mut analyzed_modules = 0usize;
        let mut degraded = false;

        for module in &self.config.modules {
            if cancel.is_cancelled() {
                return Err(ToolError::Cancelled.into());
            }

            if !module.classes_dir.exists() {
                info!(
                    classes_dir = %module.classes_dir.display(),
                    "no classes to analyze, skipping module"
                );
                continue;
            }

            let mut class_dirs = vec![module.classes_dir.clone()];
            if module.test_classes_dir.exists() {
                class_dirs.push(module.test_classes_dir.clone());
            } else {
                info!(
                    test_classes_dir = %module.test_classes_dir.display(),
                    "no test classes directory, analyzing main classes only"
                );
            }

            let executable = self.discovery.locate()?;
            let invocation = JdepsInvocation::new(executable, class_dirs);
            info!(command = %invocation.render(), "running dependency analysis");

            let analysis_start = Instant::now();
            let output = run_analysis(self.runner.as_ref(), &invocation, cancel)?;
            let elapsed_ms = analysis_start.elapsed().as_millis() as u64;
            analysis_ms += elapsed_ms;
            info!(elapsed_ms, "dependency analysis finished");

            for line in output.stderr.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    warn!("jdeps: {line}");
                }
            }

            let outcome = parse_dependencies(&output.stdout);
            if outcome.edges.is_empty() && !output.stdout.trim().is_empty() {
                if self.config.strict_parse {
                    bail!(
                        "no dependency facts recognized in analyzer output ({} lines skipped)",
                        outcome.lines_skipped
                    );
                }
                degraded = true;
                warn!(
                    lines_skipped = outcome.lines_skipped,
                    "analyzer output yielded no dependency facts, test selection may be incomplete"
                );
            }

            parsed_edges += outcome.edge_count();
            graph.merge(DependencyGraph::from_edges(outcome.edges));
            analyzed_modules += 1;
        }

        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled.into());
        }

        // Covers the all-modules-empty-output case as well.
        if analyzed_modules > 0 && parsed_edges == 0 {
            degraded = true;
        }

        let impacted = resolve_impact(&graph, changed);
        let plan = generate_plan(&impacted, self.predicate.as_ref());

        let pipeline_ms = pipeline_start.elapsed().as_millis() as u64;
        info!(
            tests = plan.len(),
            impacted = impacted.len(),
            changed = changed.len(),
            pipeline_ms,
            "test plan ready"
        );

        Ok(PlanReport {
            plan,
            run_all_tests: false,
            degraded,
            changed_classes: changed.len(),
            impacted_classes: impacted.len(),
            parsed_edges,
            graph_nodes: graph.node_count(),
            graph_edges: graph.edge_count(),
            analysis_ms,
            pipeline_ms,
        })
    }
}
