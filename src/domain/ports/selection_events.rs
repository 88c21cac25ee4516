//! Selection Event Port
//!
//! Observable interface for cascade operations. Lets the CLI stream NDJSON,
//! route changes into `tracing`, or stay silent.

/// Why a menu entered the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCause {
    /// The operator selected the menu (or its system)
    Explicit,
    /// An ancestor was selected and cascaded down
    Cascade,
    /// A descendant was selected and propagated up
    Ancestor,
    /// One of the menu's resources was selected
    Resource,
}

impl SelectionCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionCause::Explicit => "explicit",
            SelectionCause::Cascade => "cascade",
            SelectionCause::Ancestor => "ancestor",
            SelectionCause::Resource => "resource",
        }
    }
}

/// Event emitted while the selection changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SystemSelected { system_id: String },
    SystemDeselected { system_id: String },

    MenuSelected {
        menu_id: String,
        cause: SelectionCause,
    },
    MenuDeselected { menu_id: String },

    ResourceSelected { resource_id: String },
    ResourceDeselected { resource_id: String },

    /// Lazy load attempt started (attempt is 1-based)
    ResourcesLoading { menu_id: String, attempt: usize },
    /// Lazy load attempt resolved
    ResourcesLoaded { menu_id: String, count: usize },
    /// Loader rejected; the menu stays selected without resources
    ResourceLoadFailed { menu_id: String, error: String },
}

/// Trait for receiving selection events
pub trait SelectionEventSink: Send + Sync {
    fn on_event(&self, event: SelectionEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SelectionEventSink for NoopEventSink {
    fn on_event(&self, _event: SelectionEvent) {}
}
