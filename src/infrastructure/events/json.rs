//! JSON Event Sink
//!
//! Outputs selection events as NDJSON for automation consumption.

use crate::domain::ports::{SelectionEvent, SelectionEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

pub(crate) fn event_to_json(event: SelectionEvent) -> serde_json::Value {
    match event {
        SelectionEvent::SystemSelected { system_id } => serde_json::json!({
            "event": "system_selected",
            "system_id": system_id,
        }),
        SelectionEvent::SystemDeselected { system_id } => serde_json::json!({
            "event": "system_deselected",
            "system_id": system_id,
        }),
        SelectionEvent::MenuSelected { menu_id, cause } => serde_json::json!({
            "event": "menu_selected",
            "menu_id": menu_id,
            "cause": cause.as_str(),
        }),
        SelectionEvent::MenuDeselected { menu_id } => serde_json::json!({
            "event": "menu_deselected",
            "menu_id": menu_id,
        }),
        SelectionEvent::ResourceSelected { resource_id } => serde_json::json!({
            "event": "resource_selected",
            "resource_id": resource_id,
        }),
        SelectionEvent::ResourceDeselected { resource_id } => serde_json::json!({
            "event": "resource_deselected",
            "resource_id": resource_id,
        }),
        SelectionEvent::ResourcesLoading { menu_id, attempt } => serde_json::json!({
            "event": "load_start",
            "menu_id": menu_id,
            "attempt": attempt,
        }),
        SelectionEvent::ResourcesLoaded { menu_id, count } => serde_json::json!({
            "event": "load_complete",
            "menu_id": menu_id,
            "count": count,
        }),
        SelectionEvent::ResourceLoadFailed { menu_id, error } => serde_json::json!({
            "event": "load_error",
            "menu_id": menu_id,
            "error": error,
        }),
    }
}

impl SelectionEventSink for JsonEventSink {
    fn on_event(&self, event: SelectionEvent) {
        self.write_event(event_to_json(event));
    }
}
