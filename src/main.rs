use anyhow::Result;
use clap::Parser;
use revtest::error::ToolError;
use revtest::jdeps::CancelToken;
use revtest::model::{ChangeSet, ClassId, PlanReport};
use revtest::orchestrator::{ModulePaths, Orchestrator, PlanConfig};
use revtest::plan::NamePatterns;
use revtest::{cli, util};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn load_change_set(changed: Vec<String>, changed_file: Option<PathBuf>) -> Result<ChangeSet> {
    let mut set: ChangeSet = changed
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .map(ClassId::new)
        .collect();

    if let Some(path) = changed_file {
        let content = util::read_to_string(&path)?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            set.insert(ClassId::new(line));
        }
    }

    Ok(set)
}

fn print_report(report: &PlanReport, format: cli::OutputFormat) -> Result<()> {
    match format {
        cli::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        cli::OutputFormat::Plain => {
            for class in report.plan.iter() {
                println!("{class}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Plan {
            classes_dir,
            test_classes_dir,
            changed,
            changed_file,
            test_patterns,
            jdeps,
            strict_parse,
            on_error,
            format,
        } => {
            let change_set = load_change_set(changed, changed_file)?;
            let predicate = if test_patterns.is_empty() {
                NamePatterns::surefire_defaults()
            } else {
                NamePatterns::new(test_patterns)
            };

            let config = PlanConfig {
                modules: vec![ModulePaths {
                    classes_dir,
                    test_classes_dir,
                }],
                jdeps_path: jdeps,
                strict_parse,
            };
            let orchestrator = Orchestrator::new(config).with_predicate(Box::new(predicate));
            let cancel = CancelToken::new();

            match orchestrator.run(&change_set, &cancel) {
                Ok(report) => print_report(&report, format),
                Err(err) => {
                    let cancelled = err
                        .downcast_ref::<ToolError>()
                        .is_some_and(ToolError::is_cancelled);
                    match on_error {
                        // Cancellation is never papered over with a
                        // fallback plan: "we don't know" is not "run all".
                        cli::OnError::RunAll if !cancelled => {
                            warn!("analysis failed, falling back to the full test suite: {err:#}");
                            print_report(&PlanReport::run_all(), format)
                        }
                        _ => Err(err.context("test planning failed")),
                    }
                }
            }
        }
    }
}
