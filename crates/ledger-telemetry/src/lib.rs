//! # Ledger Telemetry
//!
//! Observability for the LedgerCore read-path subsystems.
//!
//! ## Components
//!
//! - **Metrics**: Prometheus registry with per-buffer histograms for the
//!   stream cache hot path, exported in text format for scraping.
//! - **Logging**: `tracing` subscriber setup with env-filter and optional
//!   JSON output for containerized deployments.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("telemetry init failed");
//!     // Application code; metrics and logs are now collected.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LC_SERVICE_NAME` | `ledgercore` | Service name attached to logs |
//! | `LC_LOG_LEVEL` | `info` | Log level filter |
//! | `LC_JSON_LOGS` | `false` | Emit JSON log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::LoggingGuard;
pub use metrics::{
    encode_metrics, register_metrics, BufferMetrics, HistogramTimer, MetricsHandle,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Prometheus registration failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Subscriber installation failed (usually: installed twice).
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Guard that keeps telemetry active. Drop to flush and shut down.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
    _logging: LoggingGuard,
}

/// Initialize metrics and logging in one call.
///
/// Returns a guard that must be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logging = logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        _metrics: metrics,
        _logging: logging,
    })
}
