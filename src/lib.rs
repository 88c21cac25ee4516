//! rolegrant - cascading role permission selection
//!
//! Edits the permissions granted to a role across three levels (system, menu,
//! resource). Selecting or deselecting at any level keeps the other levels
//! consistent, and menu resources are fetched lazily the first time a menu is
//! selected or expanded.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{parse_script, PermissionEditor, ToggleOp};
pub use config::Config;
pub use domain::entities::{parse_forest, PermissionState, PermissionTreeNode};
pub use domain::ports::{LoadError, ResourceLoader};
pub use domain::services::{CascadeSelector, LoadPolicy};
pub use domain::value_objects::{PermissionStats, SelectionPayload};
pub use error::{GrantError, GrantResult};
