//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `loader/` - Resource loaders (JSON directory, in-memory catalog)
//! - `events/` - Selection event sinks (NDJSON, tracing)

pub mod events;
pub mod loader;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use loader::{InMemoryResourceLoader, JsonDirResourceLoader};
