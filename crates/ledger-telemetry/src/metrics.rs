//! Prometheus metrics for LedgerCore subsystems.
//!
//! All metrics follow the naming convention: `lc_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Histogram**: Distribution of values (durations, slice sizes).
//!
//! The stream buffer metrics are `HistogramVec`s keyed by a `buffer` label
//! so several buffer instances (e.g. `transactions`, `completions`) share
//! one metric family.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramVec, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // STREAM BUFFER METRICS (Subsystem 1)
    // =========================================================================

    /// Time spent appending one event to a stream buffer.
    pub static ref BUFFER_PUSH_DURATION: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "lc_stream_buffer_push_duration_seconds",
            "Time spent appending one event to the in-memory stream buffer"
        ).buckets(exponential_buckets(0.000001, 2.0, 16).unwrap()),
        &["buffer"]
    ).expect("metric creation failed");

    /// Time spent answering a range query from a stream buffer.
    pub static ref BUFFER_SLICE_DURATION: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "lc_stream_buffer_slice_duration_seconds",
            "Time spent answering a range query from the in-memory stream buffer"
        ).buckets(exponential_buckets(0.000001, 2.0, 16).unwrap()),
        &["buffer"]
    ).expect("metric creation failed");

    /// Time spent dropping entries at or below a pruning offset.
    pub static ref BUFFER_PRUNE_DURATION: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "lc_stream_buffer_prune_duration_seconds",
            "Time spent pruning the in-memory stream buffer"
        ).buckets(exponential_buckets(0.000001, 2.0, 16).unwrap()),
        &["buffer"]
    ).expect("metric creation failed");

    /// Number of entries returned per range query.
    pub static ref BUFFER_SLICE_SIZE: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "lc_stream_buffer_slice_size",
            "Number of entries returned per stream buffer range query"
        ).buckets(exponential_buckets(1.0, 2.0, 14).unwrap()),
        &["buffer"]
    ).expect("metric creation failed");
}

/// Handle for the registered metric families.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metric families with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BUFFER_PUSH_DURATION.clone()),
        Box::new(BUFFER_SLICE_DURATION.clone()),
        Box::new(BUFFER_PRUNE_DURATION.clone()),
        Box::new(BUFFER_SLICE_SIZE.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all registered metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// The stream buffer metric signals resolved for one qualified buffer.
///
/// Holding the resolved children avoids a label lookup on every operation
/// on the hot path.
#[derive(Clone)]
pub struct BufferMetrics {
    push_duration: Histogram,
    slice_duration: Histogram,
    prune_duration: Histogram,
    slice_size: Histogram,
}

impl BufferMetrics {
    /// Resolves the buffer metric family children for `qualifier`.
    pub fn new(qualifier: &str) -> Self {
        Self {
            push_duration: BUFFER_PUSH_DURATION.with_label_values(&[qualifier]),
            slice_duration: BUFFER_SLICE_DURATION.with_label_values(&[qualifier]),
            prune_duration: BUFFER_PRUNE_DURATION.with_label_values(&[qualifier]),
            slice_size: BUFFER_SLICE_SIZE.with_label_values(&[qualifier]),
        }
    }

    /// Start timing a push; observation happens when the guard drops.
    pub fn time_push(&self) -> HistogramTimer {
        HistogramTimer::new(&self.push_duration)
    }

    /// Start timing a slice; observation happens when the guard drops.
    pub fn time_slice(&self) -> HistogramTimer {
        HistogramTimer::new(&self.slice_duration)
    }

    /// Start timing a prune; observation happens when the guard drops.
    pub fn time_prune(&self) -> HistogramTimer {
        HistogramTimer::new(&self.prune_duration)
    }

    /// Record an externally measured push duration.
    pub fn observe_push_seconds(&self, seconds: f64) {
        self.push_duration.observe(seconds);
    }

    /// Record an externally measured slice duration.
    pub fn observe_slice_seconds(&self, seconds: f64) {
        self.slice_duration.observe(seconds);
    }

    /// Record an externally measured prune duration.
    pub fn observe_prune_seconds(&self, seconds: f64) {
        self.prune_duration.observe(seconds);
    }

    /// Record the number of entries returned by a slice.
    pub fn observe_slice_size(&self, len: u64) {
        self.slice_size.observe(len as f64);
    }
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        // May fail if another test registered first, which is fine.
        let _ = register_metrics();
    }

    #[test]
    fn test_buffer_metrics_resolve_per_qualifier() {
        let a = BufferMetrics::new("transactions");
        let b = BufferMetrics::new("completions");
        a.observe_slice_size(3);
        b.observe_slice_size(5);
        assert_eq!(a.slice_size.get_sample_count(), 1);
    }

    #[test]
    fn test_histogram_timer_observes_on_drop() {
        let metrics = BufferMetrics::new("timer-test");
        let before = metrics.push_duration.get_sample_count();
        {
            let _timer = metrics.time_push();
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(metrics.push_duration.get_sample_count(), before + 1);
    }
}
