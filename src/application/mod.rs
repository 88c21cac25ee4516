//! Application Layer
//!
//! Orchestrates editing sessions on top of the domain layer:
//!
//! - `PermissionEditor` - open a role's forest, apply toggles, save the payload
//! - `script` - line-oriented toggle scripts used by the CLI

pub mod editor;
pub mod script;

pub use editor::PermissionEditor;
pub use script::{parse_script, ToggleOp, ToggleParseError};
