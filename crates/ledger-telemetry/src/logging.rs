//! Structured logging setup.
//!
//! Installs a `tracing` subscriber with an env-filter and either a
//! human-readable or a JSON formatting layer. JSON lines carry consistent
//! fields (`timestamp`, `level`, `target`, `message`) that log shippers
//! can parse without custom rules.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Handle returned by [`init_logging`]. Currently nothing to flush on drop;
/// kept as a guard so the call sites don't change if that changes.
pub struct LoggingGuard {
    _initialized: bool,
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed for this process.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "structured logging initialized"
    );

    Ok(LoggingGuard { _initialized: true })
}

#[cfg(test)]
mod tests {
    // Subscriber installation is global per process; exercised in the
    // integration-tests crate where a single install is guaranteed.
}
