//! Event stream buffer error types.

use std::fmt;
use thiserror::Error;

/// Event stream buffer error type.
///
/// Only `push` can fail, and only on an ordering violation. The violation
/// is a programmer error on the committer side, not an operational one:
/// callers must treat it as fatal for their session rather than retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventBufferError<O: fmt::Debug> {
    /// The pushed offset does not advance the log.
    #[error("pushed offset {attempted:?} is not strictly greater than the last buffered offset {last:?}")]
    UnorderedOffsets {
        /// Offset of the last buffered entry at the time of the push.
        last: O,
        /// Offset the caller attempted to append.
        attempted: O,
    },
}
