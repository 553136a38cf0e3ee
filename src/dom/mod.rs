//! Document abstraction - the surface the engine acts against
//!
//! The engine never assumes control over the embedded document's code. It
//! only needs a queryable root, a handful of element operations, and a frame
//! handle that may or may not allow direct inspection.

pub mod element;
pub mod frame;
pub mod memory;

pub use element::{DocumentRoot, Element, SelectorError, StyleSnapshot};
pub use frame::{embed, CrossOriginFrame, Frame, MessageSink, SameOriginFrame};
pub use memory::{MemoryDocument, MemoryElement};
