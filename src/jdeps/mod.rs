//! jdeps integration: locating the executable, invoking it as a child
//! process, and parsing its class-level verbose output into dependency
//! facts.
//!
//! The process boundary is a trait ([`ToolRunner`]) so the rest of the
//! pipeline can be exercised with scripted output instead of a real JDK.

pub mod command;
pub mod discovery;
pub mod parser;

pub use command::{CancelToken, JdepsInvocation, ProcessRunner, ToolOutput, ToolRunner, run_analysis};
pub use discovery::{EnvDiscovery, ToolDiscovery};
pub use parser::{ParseOutcome, parse_dependencies};
