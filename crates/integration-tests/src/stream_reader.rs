//! # Stream Backfill Choreography
//!
//! Simulates the subscriber side of the stream read path: range queries are
//! answered from the in-memory buffer, and whenever the buffer cannot
//! honour the left endpoint it reports the offset up to which the durable
//! store must be read. The subscriber stitches both parts back together.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use lc_01_event_buffer::{BufferSlice, EventsBuffer, NullMetricsSink};
use shared_types::Offset;

/// A committed event as the stream layer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedEvent {
    /// Transaction that produced the event.
    pub transaction_id: String,
    /// Workflow correlation, when the submitter provided one.
    pub workflow_id: Option<String>,
}

impl CommittedEvent {
    fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            workflow_id: None,
        }
    }
}

/// Subscriber fixture: a durable store plus the in-memory buffer in front
/// of it, fed by the same commit stream.
pub struct StreamReader {
    durable: BTreeMap<Offset, CommittedEvent>,
    buffer: EventsBuffer<Offset, CommittedEvent>,
}

impl StreamReader {
    /// Builds a reader whose buffer holds at most `buffer_size` events.
    pub fn new(buffer_size: usize, chunk_size: usize) -> Self {
        Self {
            durable: BTreeMap::new(),
            buffer: EventsBuffer::new(buffer_size, Arc::new(NullMetricsSink), chunk_size),
        }
    }

    /// Commits one event: durable store first, then the buffer.
    pub fn commit(&mut self, offset: Offset, event: CommittedEvent) {
        self.durable.insert(offset, event.clone());
        self.buffer
            .push(offset, event)
            .expect("commit stream is ordered");
    }

    /// Answers `(start_exclusive, end_inclusive]` the way a subscriber
    /// does: buffer first, durable store for whatever the buffer could not
    /// honour.
    pub fn read_range(
        &self,
        start_exclusive: Offset,
        end_inclusive: Offset,
    ) -> Vec<(Offset, CommittedEvent)> {
        match self
            .buffer
            .slice(&start_exclusive, &end_inclusive, |event| Some(event.clone()))
        {
            BufferSlice::Inclusive(slice) => slice,
            BufferSlice::LastBufferChunkSuffix {
                buffered_start_exclusive,
                slice,
            } => {
                let mut stitched: Vec<(Offset, CommittedEvent)> = self
                    .durable
                    .range((
                        Bound::Excluded(start_exclusive),
                        Bound::Included(buffered_start_exclusive),
                    ))
                    .map(|(offset, event)| (*offset, event.clone()))
                    .collect();
                stitched.extend(slice);
                stitched
            }
        }
    }

    /// Ground truth: the durable store alone.
    pub fn durable_range(
        &self,
        start_exclusive: Offset,
        end_inclusive: Offset,
    ) -> Vec<(Offset, CommittedEvent)> {
        self.durable
            .range((
                Bound::Excluded(start_exclusive),
                Bound::Included(end_inclusive),
            ))
            .map(|(offset, event)| (*offset, event.clone()))
            .collect()
    }

    /// Drops buffered entries at or below `offset`, simulating the cache
    /// shrinking behind the durable store's retention boundary.
    pub fn prune_buffer(&self, offset: Offset) {
        self.buffer.prune(&offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_telemetry::{encode_metrics, register_metrics};
    use lc_01_event_buffer::PrometheusBufferMetrics;

    fn reader_with_events(buffer_size: usize, count: u64) -> StreamReader {
        let mut reader = StreamReader::new(buffer_size, 1000);
        for position in 1..=count {
            reader.commit(
                Offset::new(position),
                CommittedEvent::new(format!("tx-{position}")),
            );
        }
        reader
    }

    #[test]
    fn test_backfill_reconstructs_the_full_stream_after_eviction() {
        // Buffer holds 8 of 50 events; a query from the beginning must be
        // stitched from both sources.
        let reader = reader_with_events(8, 50);

        let got = reader.read_range(Offset::BEGINNING, Offset::new(50));
        assert_eq!(got, reader.durable_range(Offset::BEGINNING, Offset::new(50)));
        assert_eq!(got.len(), 50);
    }

    #[test]
    fn test_fresh_tail_query_never_touches_the_durable_store() {
        let reader = reader_with_events(8, 50);

        // (45, 50] lies entirely inside the buffered tail.
        let got = reader.read_range(Offset::new(45), Offset::new(50));
        assert_eq!(got.len(), 5);
        assert_eq!(got[0].0, Offset::new(46));
        assert_eq!(got[4].1.transaction_id, "tx-50");
    }

    #[test]
    fn test_mid_stream_queries_agree_with_ground_truth() {
        let reader = reader_with_events(8, 50);

        for (start, end) in [(0u64, 10), (10, 20), (39, 50), (41, 45), (50, 50)] {
            let got = reader.read_range(Offset::new(start), Offset::new(end));
            assert_eq!(
                got,
                reader.durable_range(Offset::new(start), Offset::new(end)),
                "range ({start}, {end}] diverged from the durable store"
            );
        }
    }

    #[test]
    fn test_reads_stay_complete_after_buffer_prune() {
        let reader = reader_with_events(100, 50);
        reader.prune_buffer(Offset::new(30));

        let got = reader.read_range(Offset::BEGINNING, Offset::new(50));
        assert_eq!(got, reader.durable_range(Offset::BEGINNING, Offset::new(50)));
    }

    #[test]
    fn test_empty_stream_read_is_empty() {
        let reader = StreamReader::new(8, 1000);
        assert!(reader
            .read_range(Offset::BEGINNING, Offset::new(10))
            .is_empty());
    }

    #[test]
    fn test_buffer_operations_surface_in_prometheus_registry() {
        // Another test (or crate) may have registered the families already.
        let _ = register_metrics();

        let sink = Arc::new(PrometheusBufferMetrics::new("integration"));
        let buffer: EventsBuffer<u64, &str> = EventsBuffer::new(8, sink, 16);
        buffer.push(1, "tx").unwrap();
        buffer.slice(&0, &1, |entry| Some(*entry));

        let rendered = encode_metrics().unwrap();
        assert!(rendered.contains("lc_stream_buffer_slice_size"));
        assert!(rendered.contains("lc_stream_buffer_push_duration_seconds"));
    }
}
