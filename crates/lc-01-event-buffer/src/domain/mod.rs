//! Domain layer of the event stream buffer.

pub mod buffer;
pub mod errors;
pub mod value_objects;

pub use buffer::EventsBuffer;
pub use errors::EventBufferError;
pub use value_objects::{index_after, BufferSlice};
