//! # Inbound Port - EventStreamCache
//!
//! Primary driving port exposing the buffer to the stream subscription
//! layer. Subscribers answer range queries through this trait and fall
//! back to the durable store only when the answer is a
//! `LastBufferChunkSuffix`.

use crate::domain::{BufferSlice, EventBufferError, EventsBuffer};

/// Primary API of the event stream buffer.
///
/// The committer drives `push` and `prune`; stream subscribers drive
/// `slice`. Implementations must keep all operations safe to call from
/// multiple threads.
pub trait EventStreamCache<O, E>: Send + Sync
where
    O: Ord + Clone + std::fmt::Debug,
    E: Clone,
{
    /// Appends one committed event.
    ///
    /// # Errors
    /// - `UnorderedOffsets`: the offset does not advance the log. Fatal for
    ///   the committing session.
    fn push(&self, offset: O, entry: E) -> Result<(), EventBufferError<O>>;

    /// Answers the range query `(start_exclusive, end_inclusive]`.
    ///
    /// An empty `Inclusive` slice can mean "entries existed in range but
    /// the filter rejected all of them"; callers that treat it as "no more
    /// events in range" must be aware of this.
    fn slice<FR>(
        &self,
        start_exclusive: &O,
        end_inclusive: &O,
        filter: &dyn Fn(&E) -> Option<FR>,
    ) -> BufferSlice<O, (O, FR)>
    where
        Self: Sized;

    /// Drops every entry with offset ≤ `end_inclusive`.
    fn prune(&self, end_inclusive: &O);

    /// Empties the buffer.
    fn flush(&self);

    /// Number of buffered entries.
    fn len(&self) -> usize;

    /// True when nothing is buffered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<O, E> EventStreamCache<O, E> for EventsBuffer<O, E>
where
    O: Ord + Clone + std::fmt::Debug + Send + Sync,
    E: Clone + Send + Sync,
{
    fn push(&self, offset: O, entry: E) -> Result<(), EventBufferError<O>> {
        EventsBuffer::push(self, offset, entry)
    }

    fn slice<FR>(
        &self,
        start_exclusive: &O,
        end_inclusive: &O,
        filter: &dyn Fn(&E) -> Option<FR>,
    ) -> BufferSlice<O, (O, FR)> {
        EventsBuffer::slice(self, start_exclusive, end_inclusive, filter)
    }

    fn prune(&self, end_inclusive: &O) {
        EventsBuffer::prune(self, end_inclusive)
    }

    fn flush(&self) {
        EventsBuffer::flush(self)
    }

    fn len(&self) -> usize {
        EventsBuffer::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::NullMetricsSink;
    use std::sync::Arc;

    // Everything except the generic `slice` stays usable through a trait
    // object, so subscribers can hold `&dyn EventStreamCache`.
    fn _assert_object_safe(cache: &dyn EventStreamCache<u64, String>) {
        let _ = cache.len();
    }

    fn drain_tail<C: EventStreamCache<u64, &'static str>>(cache: &C) -> Vec<(u64, &'static str)> {
        match cache.slice(&0, &u64::MAX, &|entry| Some(*entry)) {
            BufferSlice::Inclusive(slice) => slice,
            BufferSlice::LastBufferChunkSuffix { slice, .. } => slice,
        }
    }

    #[test]
    fn test_buffer_drives_through_the_port() {
        let buffer: EventsBuffer<u64, &'static str> =
            EventsBuffer::new(4, Arc::new(NullMetricsSink), 10);
        let cache: &dyn EventStreamCache<u64, &'static str> = &buffer;

        cache.push(1, "A").unwrap();
        cache.push(2, "B").unwrap();
        assert_eq!(cache.len(), 2);

        // Generic consumers get the full slice surface.
        assert_eq!(drain_tail(&buffer), vec![(2, "B")]);

        cache.prune(&1);
        assert_eq!(cache.len(), 1);
        cache.flush();
        assert!(cache.is_empty());
    }
}
