//! Ports (driving and driven interfaces) of the event stream buffer.

pub mod inbound;
pub mod outbound;

pub use inbound::EventStreamCache;
pub use outbound::{BufferMetricsSink, NullMetricsSink};
