//! jdeps child-process invocation.
//!
//! The child's stdout and stderr are fully buffered before the exit code
//! is inspected; per-module class-dependency output is bounded by module
//! size. The process is polled rather than waited on so cancellation and
//! the configured timeout can kill it promptly.

use crate::config::Config;
use crate::error::ToolError;
use crate::util::truncate_str_bytes;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cooperative cancellation flag shared with the host build. Cloning
/// shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A fully-resolved analyzer invocation for one module.
#[derive(Debug, Clone)]
pub struct JdepsInvocation {
    pub executable: PathBuf,
    /// Compiled-classes locations to analyze, typically the module's main
    /// and test class directories.
    pub class_dirs: Vec<PathBuf>,
}

impl JdepsInvocation {
    pub fn new(executable: PathBuf, class_dirs: Vec<PathBuf>) -> Self {
        Self {
            executable,
            class_dirs,
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-verbose:class");
        for dir in &self.class_dirs {
            cmd.arg(dir);
        }
        cmd
    }

    /// Rendered command line for logs and diagnostics.
    pub fn render(&self) -> String {
        let mut parts = vec![
            self.executable.display().to_string(),
            "-verbose:class".to_string(),
        ];
        parts.extend(self.class_dirs.iter().map(|dir| dir.display().to_string()));
        parts.join(" ")
    }
}

/// Captured result of one analyzer run. The stderr field has JVM banner
/// noise already filtered out.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

/// Process boundary to the analyzer. Injectable so the pipeline can be
/// tested with scripted output instead of spawning real processes.
pub trait ToolRunner {
    fn run(
        &self,
        invocation: &JdepsInvocation,
        cancel: &CancelToken,
    ) -> Result<ToolOutput, ToolError>;
}

/// Run the invocation and enforce a zero exit: a non-zero exit code is a
/// hard failure of the analysis stage, surfaced with captured stderr.
pub fn run_analysis(
    runner: &dyn ToolRunner,
    invocation: &JdepsInvocation,
    cancel: &CancelToken,
) -> Result<ToolOutput, ToolError> {
    let output = runner.run(invocation, cancel)?;
    if output.code != 0 {
        return Err(ToolError::ExecutionFailed {
            code: output.code,
            stderr: output.stderr.clone(),
        });
    }
    Ok(output)
}

/// Real child-process runner.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Drop JVM startup banner lines so they are never mistaken for analyzer
/// diagnostics.
fn filter_jvm_banner(stderr: &str) -> String {
    stderr
        .lines()
        .filter(|line| !line.starts_with("Picked up JAVA_TOOL_OPTIONS:"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ToolRunner for ProcessRunner {
    fn run(
        &self,
        invocation: &JdepsInvocation,
        cancel: &CancelToken,
    ) -> Result<ToolOutput, ToolError> {
        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled);
        }

        debug!(command = %invocation.render(), "spawning analyzer");

        let config = Config::get();
        let timeout = Duration::from_secs(u64::from(config.analysis_timeout_secs));
        let poll_interval = Duration::from_millis(config.poll_interval_ms);

        let mut child = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::SpawnFailed {
                tool: invocation.executable.clone(),
                source,
            })?;

        // Drain the pipes on their own threads so a chatty child cannot
        // block on a full pipe buffer while we poll for exit.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_thread = thread::spawn(move || read_pipe(stdout_pipe));
        let stderr_thread = thread::spawn(move || read_pipe(stderr_pipe));

        let started = Instant::now();
        let status = loop {
            if cancel.is_cancelled() {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Cancelled);
            }
            if started.elapsed() > timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Timeout {
                    seconds: timeout.as_secs(),
                });
            }
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(poll_interval),
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::SpawnFailed {
                        tool: invocation.executable.clone(),
                        source,
                    });
                }
            }
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr_raw = stderr_thread.join().unwrap_or_default();
        let stderr = truncate_str_bytes(&filter_jvm_banner(&stderr_raw), config.stderr_max_bytes);

        Ok(ToolOutput {
            stdout,
            stderr,
            code: status.code().unwrap_or(-1),
        })
    }
}
