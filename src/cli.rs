use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "revtest",
    version,
    about = "Selective test planning from bytecode dependency analysis",
    after_help = r#"Examples:
  revtest plan --changed com.example.Core
  revtest plan --classes-dir target/classes --test-classes-dir target/test-classes --changed com.example.Core,com.example.Util
  revtest plan --changed-file changed.txt --format plain
  revtest plan --changed com.example.Core --test-pattern 'IT*' --test-pattern '*IT'
  revtest plan --changed com.example.Core --on-error run-all
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the impacted-test execution plan for a module.
    Plan {
        /// Compiled main classes directory.
        #[arg(long, default_value = "target/classes")]
        classes_dir: PathBuf,
        /// Compiled test classes directory.
        #[arg(long, default_value = "target/test-classes")]
        test_classes_dir: PathBuf,
        /// Changed classes, fully qualified. Repeatable or comma-separated.
        #[arg(long = "changed", value_delimiter = ',')]
        changed: Vec<String>,
        /// File listing one changed class per line ('#' starts a comment).
        #[arg(long, value_name = "PATH")]
        changed_file: Option<PathBuf>,
        /// Wildcard patterns identifying test classes by simple name.
        /// Defaults to the Surefire conventions (Test*, *Test, *Tests, *TestCase).
        #[arg(long = "test-pattern")]
        test_patterns: Vec<String>,
        /// Explicit jdeps executable or JDK bin directory.
        #[arg(long)]
        jdeps: Option<PathBuf>,
        /// Fail when the analyzer output yields no dependency facts.
        #[arg(long)]
        strict_parse: bool,
        /// Policy when analysis fails.
        #[arg(long, value_enum, default_value = "fail")]
        on_error: OnError,
        /// Output format for the plan report.
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

/// What to do when the analysis stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Abort with a diagnostic error.
    Fail,
    /// Emit a full-suite fallback plan and log the failure.
    RunAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed plan report.
    Json,
    /// One test class per line, for direct use as a runner filter.
    Plain,
}
