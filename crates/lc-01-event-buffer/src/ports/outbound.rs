//! Outbound (Driven) ports for the event stream buffer.
//!
//! The buffer's only external dependency is the metrics sink; everything
//! else it owns. Keeping the sink behind a trait lets the domain stay free
//! of the concrete telemetry backend.

/// Metric signals emitted by a buffer instance.
///
/// One sink instance corresponds to one qualified buffer (e.g. the
/// `transactions` stream); implementations carry the qualifier themselves.
pub trait BufferMetricsSink: Send + Sync {
    /// Duration of one `push`, including the ordering check.
    fn observe_push_seconds(&self, seconds: f64);

    /// Duration of one `slice`, including the caller-supplied filter.
    fn observe_slice_seconds(&self, seconds: f64);

    /// Duration of one `prune`.
    fn observe_prune_seconds(&self, seconds: f64);

    /// Number of entries returned by one `slice`.
    fn observe_slice_size(&self, entries: u64);
}

/// Sink that drops every signal. For callers that do not scrape metrics
/// (benchmarks, tools) and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetricsSink;

impl BufferMetricsSink for NullMetricsSink {
    fn observe_push_seconds(&self, _seconds: f64) {}
    fn observe_slice_seconds(&self, _seconds: f64) {}
    fn observe_prune_seconds(&self, _seconds: f64) {}
    fn observe_slice_size(&self, _entries: u64) {}
}

/// Recording sink for assertions on emitted signals.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    pushes: std::sync::atomic::AtomicU64,
    slice_sizes: parking_lot::Mutex<Vec<u64>>,
}

#[cfg(test)]
impl RecordingMetricsSink {
    pub fn push_count(&self) -> u64 {
        self.pushes.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn slice_sizes(&self) -> Vec<u64> {
        self.slice_sizes.lock().clone()
    }
}

#[cfg(test)]
impl BufferMetricsSink for RecordingMetricsSink {
    fn observe_push_seconds(&self, _seconds: f64) {
        self.pushes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn observe_slice_seconds(&self, _seconds: f64) {}

    fn observe_prune_seconds(&self, _seconds: f64) {}

    fn observe_slice_size(&self, entries: u64) {
        self.slice_sizes.lock().push(entries);
    }
}
