//! # Event Stream Buffer Subsystem
//!
//! **Subsystem ID:** 1
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Caches the most recent committed events of the transaction log in memory
//! so that streaming subscribers answer range queries without touching the
//! durable store. The buffer is bounded, strictly ordered by offset, and
//! safe to read while writers append.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Strictly increasing offsets | `domain/buffer.rs` - `push()` ordering check |
//! | Length ≤ `max_buffer_size` | `domain/buffer.rs` - `push()` oldest-first eviction |
//! | Mutation only via push/prune/flush | `EventsBuffer` exposes no other mutators |
//! | Readers see a complete log | copy-on-write snapshot swap, never in-place edits |
//!
//! ## Range Query Semantics
//!
//! A `slice(start_exclusive, end_inclusive, filter)` call answers one of:
//!
//! ```text
//! [Inclusive]              start lies at or past the first buffered offset;
//!                          the buffer alone can serve the window.
//! [LastBufferChunkSuffix]  start precedes the buffered range; the buffer
//!                          returns its tail chunk plus the offset up to
//!                          which the caller must read the durable store.
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - Prometheus metrics sink                            │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - EventStreamCache trait                     │
//! │  ports/outbound.rs - BufferMetricsSink trait                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/buffer.rs        - EventsBuffer core                    │
//! │  domain/value_objects.rs - BufferSlice, index_after             │
//! │  domain/errors.rs        - EventBufferError enum                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::PrometheusBufferMetrics;
pub use domain::{index_after, BufferSlice, EventBufferError, EventsBuffer};
pub use ports::{BufferMetricsSink, EventStreamCache, NullMetricsSink};
