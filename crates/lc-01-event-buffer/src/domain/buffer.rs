//! # Events Buffer - Ordered In-Memory Cache of the Transaction Log Tail
//!
//! Implements the core buffer data structure for the stream read path.
//!
//! ## Data Structures
//!
//! - `log`: snapshot-published `Arc<Vec<(O, E)>>`, strictly ordered by offset
//! - `mutator`: lock serializing `push`, `prune` and `flush`
//!
//! ## Invariants Enforced
//!
//! - Strictly increasing offsets (checked in `push()`)
//! - Length ≤ `max_buffer_size` (oldest-first eviction in `push()`)
//! - Readers always observe a complete log (copy-on-write snapshot swap)
//!
//! ## Concurrency
//!
//! Mutators hold `mutator` for their whole critical section and take the
//! `log` write lock only for the pointer swap. `slice` clones the `Arc`
//! under the read lock and runs the caller-supplied filter entirely outside
//! any lock, so a slow projection never stalls the committer.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Instant;

use super::errors::EventBufferError;
use super::value_objects::{index_after, BufferSlice};
use crate::ports::outbound::BufferMetricsSink;

/// Bounded, offset-ordered in-memory log of committed events.
///
/// Generic over the offset type `O` (opaque, totally ordered) and the entry
/// payload `E` (opaque, stored verbatim). Both are cloned into the
/// copy-on-write snapshot, so they should be cheap to clone (ids, `Arc`ed
/// payloads).
pub struct EventsBuffer<O, E> {
    /// Published snapshot of the log. Never mutated in place.
    log: RwLock<Arc<Vec<(O, E)>>>,
    /// Serializes push/prune/flush against each other.
    mutator: Mutex<()>,
    /// Hard bound on the number of buffered entries.
    max_buffer_size: usize,
    /// Hard bound on the number of entries returned per slice.
    max_buffered_chunk_size: usize,
    /// Metric signals for the three mutators and the slice size.
    metrics: Arc<dyn BufferMetricsSink>,
}

impl<O, E> EventsBuffer<O, E>
where
    O: Ord + Clone + std::fmt::Debug,
    E: Clone,
{
    /// Creates a buffer bounded at `max_buffer_size` entries whose slices
    /// return at most `max_buffered_chunk_size` entries each.
    ///
    /// Both bounds are clamped to at least 1.
    pub fn new(
        max_buffer_size: usize,
        metrics: Arc<dyn BufferMetricsSink>,
        max_buffered_chunk_size: usize,
    ) -> Self {
        Self {
            log: RwLock::new(Arc::new(Vec::new())),
            mutator: Mutex::new(()),
            max_buffer_size: max_buffer_size.max(1),
            max_buffered_chunk_size: max_buffered_chunk_size.max(1),
            metrics,
        }
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Appends `(offset, entry)` to the log.
    ///
    /// `offset` must be strictly greater than the last buffered offset. When
    /// the buffer is already at `max_buffer_size`, the oldest entry is
    /// dropped first, so the post-state length never exceeds the bound.
    ///
    /// # Errors
    ///
    /// `UnorderedOffsets` when `offset` does not advance the log. This is a
    /// committer bug and must be treated as fatal by the caller's session.
    pub fn push(&self, offset: O, entry: E) -> Result<(), EventBufferError<O>> {
        let started = Instant::now();
        let result = self.push_inner(offset, entry);
        self.metrics
            .observe_push_seconds(started.elapsed().as_secs_f64());
        result
    }

    fn push_inner(&self, offset: O, entry: E) -> Result<(), EventBufferError<O>> {
        let _serialized = self.mutator.lock();
        let current = self.snapshot();

        if let Some((last, _)) = current.last() {
            if offset <= *last {
                tracing::warn!(
                    last = ?last,
                    attempted = ?offset,
                    "rejecting unordered push into stream buffer"
                );
                return Err(EventBufferError::UnorderedOffsets {
                    last: last.clone(),
                    attempted: offset,
                });
            }
        }

        // Oldest-first eviction keeps the post-push length within bounds
        // even if the configured bound shrank between restarts.
        let evict = (current.len() + 1).saturating_sub(self.max_buffer_size);
        let mut next: Vec<(O, E)> = Vec::with_capacity(current.len() + 1 - evict);
        next.extend(current.iter().skip(evict).cloned());
        next.push((offset, entry));

        *self.log.write() = Arc::new(next);
        Ok(())
    }

    /// Answers the range query `(start_exclusive, end_inclusive]` from the
    /// current snapshot, projecting every entry through `filter`.
    ///
    /// Returns `Inclusive` when the buffer can honour the left endpoint and
    /// `LastBufferChunkSuffix` when `start_exclusive` precedes the buffered
    /// range (the caller then reads the durable store up to the reported
    /// marker). Note that `Inclusive` with an empty vector can also mean
    /// "entries existed in range but the filter rejected all of them".
    pub fn slice<FR>(
        &self,
        start_exclusive: &O,
        end_inclusive: &O,
        filter: impl Fn(&E) -> Option<FR>,
    ) -> BufferSlice<O, (O, FR)> {
        let started = Instant::now();
        let result = self.slice_inner(start_exclusive, end_inclusive, filter);
        self.metrics
            .observe_slice_seconds(started.elapsed().as_secs_f64());
        self.metrics.observe_slice_size(result.len() as u64);
        result
    }

    fn slice_inner<FR>(
        &self,
        start_exclusive: &O,
        end_inclusive: &O,
        filter: impl Fn(&E) -> Option<FR>,
    ) -> BufferSlice<O, (O, FR)> {
        let log = self.snapshot();

        let start_search = log.binary_search_by(|(offset, _)| offset.cmp(start_exclusive));
        let start_idx = index_after(start_search);
        let end_idx = index_after(log.binary_search_by(|(offset, _)| offset.cmp(end_inclusive)));
        let window = log.get(start_idx..end_idx).unwrap_or(&[]);

        let starts_before_buffer = start_search == Err(0);

        if starts_before_buffer && window.is_empty() {
            return BufferSlice::LastBufferChunkSuffix {
                buffered_start_exclusive: end_inclusive.clone(),
                slice: Vec::new(),
            };
        }

        if starts_before_buffer {
            return self.suffix_slice(window, &filter);
        }

        let mut projected = Vec::new();
        for (offset, entry) in window {
            if projected.len() == self.max_buffered_chunk_size {
                break;
            }
            if let Some(mapped) = filter(entry) {
                projected.push((offset.clone(), mapped));
            }
        }
        BufferSlice::Inclusive(projected)
    }

    /// Tail-chunk answer for queries whose start precedes the buffered
    /// range: the latest `max_buffered_chunk_size` matches, with one extra
    /// match consumed as the `buffered_start_exclusive` marker.
    fn suffix_slice<FR>(
        &self,
        window: &[(O, E)],
        filter: &impl Fn(&E) -> Option<FR>,
    ) -> BufferSlice<O, (O, FR)> {
        let mut collected: Vec<(O, FR)> = Vec::new();
        for (offset, entry) in window.iter().rev() {
            if collected.len() == self.max_buffered_chunk_size + 1 {
                break;
            }
            if let Some(mapped) = filter(entry) {
                collected.push((offset.clone(), mapped));
            }
        }
        collected.reverse();

        let mut matches = collected.into_iter();
        match matches.next() {
            // No match at all: the first raw offset still bounds the part
            // the caller must read from the durable store.
            None => BufferSlice::LastBufferChunkSuffix {
                buffered_start_exclusive: window[0].0.clone(),
                slice: Vec::new(),
            },
            Some((marker, _)) => BufferSlice::LastBufferChunkSuffix {
                buffered_start_exclusive: marker,
                slice: matches.collect(),
            },
        }
    }

    /// Drops every entry with offset ≤ `end_inclusive`.
    ///
    /// Afterwards the smallest remaining offset, if any, is strictly
    /// greater than `end_inclusive`.
    pub fn prune(&self, end_inclusive: &O) {
        let started = Instant::now();
        self.prune_inner(end_inclusive);
        self.metrics
            .observe_prune_seconds(started.elapsed().as_secs_f64());
    }

    fn prune_inner(&self, end_inclusive: &O) {
        let _serialized = self.mutator.lock();
        let current = self.snapshot();

        let drop_count =
            index_after(current.binary_search_by(|(offset, _)| offset.cmp(end_inclusive)));
        if drop_count == 0 {
            return;
        }

        let next: Vec<(O, E)> = current[drop_count..].to_vec();
        *self.log.write() = Arc::new(next);
    }

    /// Empties the buffer.
    pub fn flush(&self) {
        let _serialized = self.mutator.lock();
        tracing::debug!("flushing stream buffer");
        *self.log.write() = Arc::new(Vec::new());
    }

    /// Captures the published log. Cheap (`Arc` clone); the captured vector
    /// is immutable and survives later writes unchanged.
    fn snapshot(&self) -> Arc<Vec<(O, E)>> {
        self.log.read().clone()
    }
}
