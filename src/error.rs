//! Error kinds for the analysis stage.
//!
//! Parse degradation is deliberately not an error value: the parser reports
//! counts and the orchestrator decides whether to warn or abort. A changed
//! class that is missing from the graph is not an error either; it is still
//! part of the impact closure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// No jdeps executable could be located by the discovery strategy.
    #[error("jdeps executable not found (tried: {attempted})")]
    ToolNotFound { attempted: String },

    /// The analyzer process could not be spawned at all.
    #[error("unable to execute {}: {source}", .tool.display())]
    SpawnFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analyzer exited with a non-zero status. Carries captured stderr
    /// so the build log shows what the tool complained about.
    #[error("jdeps exited with code {code}: {stderr}")]
    ExecutionFailed { code: i32, stderr: String },

    /// The analyzer ran past the configured deadline and was killed.
    #[error("jdeps timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Build cancellation was requested mid-flight. Distinct from failure:
    /// "we don't know the answer", not "the answer is empty".
    #[error("analysis cancelled")]
    Cancelled,
}

impl ToolError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ToolError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_failure_surfaces_stderr() {
        let err = ToolError::ExecutionFailed {
            code: 1,
            stderr: "tool error".to_string(),
        };
        assert!(err.to_string().contains("tool error"));
        assert!(err.to_string().contains("code 1"));
    }

    #[test]
    fn cancelled_is_distinct() {
        assert!(ToolError::Cancelled.is_cancelled());
        assert!(
            !ToolError::ExecutionFailed {
                code: 2,
                stderr: String::new()
            }
            .is_cancelled()
        );
    }
}
