//! Locating a jdeps executable.
//!
//! Probe order: explicit override from configuration, then
//! `$JAVA_HOME/bin`, then `PATH`. An explicit override that does not
//! resolve is a configuration error and never falls through to probing.

use crate::error::ToolError;
use std::env;
use std::path::{Path, PathBuf};

/// Pluggable strategy resolving the analyzer executable.
pub trait ToolDiscovery {
    fn locate(&self) -> Result<PathBuf, ToolError>;
}

/// Environment-based discovery used by the CLI.
#[derive(Debug, Clone, Default)]
pub struct EnvDiscovery {
    explicit: Option<PathBuf>,
}

impl EnvDiscovery {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

fn jdeps_file_name() -> &'static str {
    if cfg!(windows) { "jdeps.exe" } else { "jdeps" }
}

fn on_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

impl ToolDiscovery for EnvDiscovery {
    fn locate(&self) -> Result<PathBuf, ToolError> {
        let mut attempted: Vec<String> = Vec::new();

        if let Some(explicit) = &self.explicit {
            let candidate = if explicit.is_dir() {
                explicit.join(jdeps_file_name())
            } else {
                explicit.clone()
            };
            if candidate.is_file() {
                return Ok(candidate);
            }
            attempted.push(candidate.display().to_string());
            return Err(ToolError::ToolNotFound {
                attempted: attempted.join(", "),
            });
        }

        if let Ok(java_home) = env::var("JAVA_HOME") {
            if !java_home.is_empty() {
                let candidate = Path::new(&java_home).join("bin").join(jdeps_file_name());
                if candidate.is_file() {
                    return Ok(candidate);
                }
                attempted.push(candidate.display().to_string());
            }
        }

        if let Some(found) = on_path(jdeps_file_name()) {
            return Ok(found);
        }
        attempted.push(format!("{} on PATH", jdeps_file_name()));

        Err(ToolError::ToolNotFound {
            attempted: attempted.join(", "),
        })
    }
}
