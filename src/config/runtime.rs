//! Runtime configuration

use serde::Deserialize;

/// Process-level settings
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Log filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn,uday=info".to_string()
}
