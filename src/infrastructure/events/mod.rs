//! Event Sink Implementations
//!
//! Provides concrete implementations of SelectionEventSink:
//! - JsonEventSink: NDJSON output for automation
//! - TracingEventSink: selection changes as `tracing` debug events

mod json;
mod trace;

pub use json::JsonEventSink;
pub use trace::TracingEventSink;
