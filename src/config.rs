// Configuration module for revtest
// Reads from environment variables with sensible defaults

use std::env;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Analyzer timeout in seconds (REVTEST_ANALYSIS_TIMEOUT_SECS)
    pub analysis_timeout_secs: u32,

    /// Maximum captured stderr bytes kept for diagnostics (REVTEST_STDERR_MAX_BYTES)
    pub stderr_max_bytes: usize,

    /// Poll interval for the child process in milliseconds (REVTEST_POLL_INTERVAL_MS)
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_timeout_secs: 120,
            stderr_max_bytes: 64 * 1024,
            poll_interval_ms: 25,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(val) = env::var("REVTEST_ANALYSIS_TIMEOUT_SECS") {
            if let Ok(parsed) = val.parse() {
                config.analysis_timeout_secs = parsed;
            } else {
                warn!(
                    value = %val,
                    default = config.analysis_timeout_secs,
                    "invalid REVTEST_ANALYSIS_TIMEOUT_SECS, using default"
                );
            }
        }

        if let Ok(val) = env::var("REVTEST_STDERR_MAX_BYTES") {
            if let Ok(parsed) = val.parse() {
                config.stderr_max_bytes = parsed;
            } else {
                warn!(
                    value = %val,
                    default = config.stderr_max_bytes,
                    "invalid REVTEST_STDERR_MAX_BYTES, using default"
                );
            }
        }

        if let Ok(val) = env::var("REVTEST_POLL_INTERVAL_MS") {
            if let Ok(parsed) = val.parse() {
                config.poll_interval_ms = parsed;
            } else {
                warn!(
                    value = %val,
                    default = config.poll_interval_ms,
                    "invalid REVTEST_POLL_INTERVAL_MS, using default"
                );
            }
        }

        config
    }

    /// Get the global configuration instance
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }
}
