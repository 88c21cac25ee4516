//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod resource_loader;
pub mod selection_events;

pub use resource_loader::{LoadError, NoopResourceLoader, ResourceLoader};
pub use selection_events::{NoopEventSink, SelectionCause, SelectionEvent, SelectionEventSink};
