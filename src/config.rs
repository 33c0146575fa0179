//! Runtime configuration (code > env).

use std::time::Duration;

/// Configuration for the orchestration loop.
#[derive(Debug, Clone)]
pub struct TangentConfig {
    /// Maximum oracle consultations per invocation before the run fails
    /// with `MaxIterationsExceeded`.
    pub max_iterations: usize,
    /// Timeout applied to each oracle call.
    pub oracle_timeout: Duration,
    /// Timeout applied to each tool invocation.
    pub tool_timeout: Duration,
}

impl Default for TangentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            oracle_timeout: Duration::from_secs(120),
            tool_timeout: Duration::from_secs(60),
        }
    }
}

impl TangentConfig {
    /// Defaults overridden by environment variables
    /// (`TANGENT_MAX_ITERATIONS`, `TANGENT_ORACLE_TIMEOUT_MS`,
    /// `TANGENT_TOOL_TIMEOUT_MS`). Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        if let Some(n) = env_parse::<usize>("TANGENT_MAX_ITERATIONS") {
            config.max_iterations = n;
        }
        if let Some(ms) = env_parse::<u64>("TANGENT_ORACLE_TIMEOUT_MS") {
            config.oracle_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>("TANGENT_TOOL_TIMEOUT_MS") {
            config.tool_timeout = Duration::from_millis(ms);
        }
        config
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
