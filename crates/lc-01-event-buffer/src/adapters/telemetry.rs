//! Prometheus adapter for the buffer metrics sink.
//!
//! Resolves the `lc_stream_buffer_*` metric families from
//! `ledger-telemetry` under the given qualifier label and forwards every
//! signal the domain emits.

use ledger_telemetry::BufferMetrics;

use crate::ports::outbound::BufferMetricsSink;

/// Metrics sink backed by the global Prometheus registry.
///
/// The `qualifier` becomes the `buffer` label, so several buffer instances
/// (e.g. `transactions` and `completions`) share one metric family while
/// staying distinguishable in dashboards.
pub struct PrometheusBufferMetrics {
    inner: BufferMetrics,
}

impl PrometheusBufferMetrics {
    /// Resolves the metric children for `qualifier`.
    pub fn new(qualifier: &str) -> Self {
        Self {
            inner: BufferMetrics::new(qualifier),
        }
    }
}

impl BufferMetricsSink for PrometheusBufferMetrics {
    fn observe_push_seconds(&self, seconds: f64) {
        self.inner.observe_push_seconds(seconds);
    }

    fn observe_slice_seconds(&self, seconds: f64) {
        self.inner.observe_slice_seconds(seconds);
    }

    fn observe_prune_seconds(&self, seconds: f64) {
        self.inner.observe_prune_seconds(seconds);
    }

    fn observe_slice_size(&self, entries: u64) {
        self.inner.observe_slice_size(entries);
    }
}
