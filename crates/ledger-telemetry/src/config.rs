//! Telemetry configuration, sourced from environment variables.

/// Configuration for metrics and logging.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Service name attached to log lines.
    pub service_name: String,
    /// Log level filter (`trace`..`error`), overridable via `RUST_LOG`.
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ledgercore".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Reads the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: std::env::var("LC_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: std::env::var("LC_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: std::env::var("LC_JSON_LOGS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.json_logs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        // No LC_* variables set in the test environment.
        let config = TelemetryConfig::from_env();
        assert_eq!(config.log_level, "info");
    }
}
