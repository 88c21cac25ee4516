//! Tracing Event Sink
//!
//! Forwards selection events to the `tracing` subscriber at debug level.

use crate::domain::ports::{SelectionEvent, SelectionEventSink};

pub struct TracingEventSink;

impl SelectionEventSink for TracingEventSink {
    fn on_event(&self, event: SelectionEvent) {
        match event {
            SelectionEvent::ResourceLoadFailed { menu_id, error } => {
                tracing::warn!(
                    target: "rolegrant::events",
                    menu_id = %menu_id,
                    error = %error,
                    "load_error"
                );
            }
            other => {
                let payload = super::json::event_to_json(other);
                tracing::debug!(target: "rolegrant::events", event = %payload, "selection");
            }
        }
    }
}
