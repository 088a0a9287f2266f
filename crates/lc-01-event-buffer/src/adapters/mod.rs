//! Adapters implementing the buffer's driven ports with concrete backends.

pub mod telemetry;

pub use telemetry::PrometheusBufferMetrics;
