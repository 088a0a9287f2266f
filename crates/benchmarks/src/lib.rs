//! # Read-Path Benchmarks
//!
//! Performance claims validated in `benches/read_path_benchmarks.rs`:
//!
//! - Buffer push at capacity (copy-on-write eviction): O(n) per push with a
//!   small constant; must sustain committer throughput for n = 10k.
//! - Slice endpoint resolution: O(log n) binary search; the filter pass is
//!   bounded by `max_buffered_chunk_size`, not by buffer size.
//! - Driving a suspension chain: O(1) stack per resumed pause.
//!
//! The crate itself is empty; everything lives in `benches/`.
