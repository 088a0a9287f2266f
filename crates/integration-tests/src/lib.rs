//! # Integration Tests Crate
//!
//! Cross-subsystem scenarios verifying that the read-path cores compose the
//! way their consumers use them:
//!
//! ## Structure
//!
//! ```text
//! integration-tests/
//! ├── src/
//! │   ├── lib.rs            # This file
//! │   ├── stream_reader.rs  # Buffer + durable store backfill choreography
//! │   └── interpreter.rs    # Computation flows over an in-memory ledger host
//! ```
//!
//! ## Integration Flows
//!
//! 1. **Stream backfill**: a subscriber answers `(start, end]` range queries
//!    from the buffer and falls back to the durable store exactly up to the
//!    `buffered_start_exclusive` marker, which is the contract the `BufferSlice`
//!    variants exist for.
//! 2. **Interpreter host loop**: suspendable computations are driven against
//!    an in-memory ledger host resolving contracts, packages, keys and
//!    visibility, covering both completion and failure propagation.
//! 3. **Telemetry**: buffer operations observed through the Prometheus
//!    adapter land in the global registry and survive text encoding.

pub mod interpreter;
pub mod stream_reader;
