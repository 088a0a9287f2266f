//! Value objects for the event stream buffer.
//!
//! Immutable types describing the outcome of a range query and the index
//! arithmetic shared by `slice` and `prune`.

/// Result of a range query against the buffer.
///
/// A closed tagged union: callers must be ready for both variants on every
/// query, because whether the buffer can honour the left endpoint depends
/// on eviction and pruning history, not on the caller's arguments alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferSlice<O, T> {
    /// The requested window started at or past the first buffered offset;
    /// `slice` is a contiguous, projected, capped prefix of that window.
    ///
    /// NOTE: `Inclusive` with an empty vector also covers the case where
    /// the window lies inside the buffered range but the filter rejected
    /// every entry. Callers that treat an empty inclusive slice as "no
    /// more events in range" rely on exactly this behaviour.
    Inclusive(Vec<T>),

    /// The requested window started before the first buffered offset; the
    /// buffer cannot honour the left endpoint and instead returns its tail
    /// chunk. Everything at or below `buffered_start_exclusive` must be
    /// read from the durable store.
    LastBufferChunkSuffix {
        /// The offset directly preceding the returned slice.
        buffered_start_exclusive: O,
        /// Tail chunk of filtered entries.
        slice: Vec<T>,
    },
}

impl<O, T> BufferSlice<O, T> {
    /// The returned entries, independent of variant.
    pub fn entries(&self) -> &[T] {
        match self {
            BufferSlice::Inclusive(slice) => slice,
            BufferSlice::LastBufferChunkSuffix { slice, .. } => slice,
        }
    }

    /// Number of returned entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// True when no entry matched the query.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Normalises a binary search outcome into the first index whose offset is
/// strictly greater than the probed offset.
///
/// `binary_search_by` already distinguishes an exact hit (`Ok(i)`) from an
/// insertion point (`Err(i)`); both `slice` endpoints and `prune` need the
/// same "first index past the probe" value:
///
/// - `Ok(i)`  → `i + 1` (the probe itself is excluded)
/// - `Err(i)` → `i`     (`i` is already the first greater index)
pub fn index_after(search: Result<usize, usize>) -> usize {
    match search {
        Ok(i) => i + 1,
        Err(i) => i,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_after_exact_hit_excludes_probe() {
        assert_eq!(index_after(Ok(0)), 1);
        assert_eq!(index_after(Ok(7)), 8);
    }

    #[test]
    fn test_index_after_insertion_point_is_identity() {
        assert_eq!(index_after(Err(0)), 0);
        assert_eq!(index_after(Err(7)), 7);
    }

    #[test]
    fn test_entries_reads_both_variants() {
        let inclusive: BufferSlice<u64, u64> = BufferSlice::Inclusive(vec![1, 2]);
        assert_eq!(inclusive.entries(), &[1, 2]);
        assert_eq!(inclusive.len(), 2);

        let suffix: BufferSlice<u64, u64> = BufferSlice::LastBufferChunkSuffix {
            buffered_start_exclusive: 5,
            slice: vec![6],
        };
        assert_eq!(suffix.entries(), &[6]);
        assert!(!suffix.is_empty());
    }
}
