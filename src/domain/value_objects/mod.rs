//! Domain Value Objects
//!
//! Immutable value types that represent permission concepts:
//! resource kinds, the saved selection payload, and aggregate counts.

mod payload;
mod resource_type;
mod stats;

pub use payload::SelectionPayload;
pub use resource_type::ResourceType;
pub use stats::PermissionStats;
