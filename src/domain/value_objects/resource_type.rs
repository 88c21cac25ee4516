//! Resource Type Value Object
//!
//! Distinguishes the two kinds of leaf permission a menu can own.

use serde::{Deserialize, Serialize};

/// Kind of a leaf permission resource
///
/// - `Api`: an API endpoint guarded by the role
/// - `Button`: a UI button or action (default when the backend omits the kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    /// API endpoint permission
    Api,
    /// Button permission (default)
    #[default]
    Button,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Api => "API",
            ResourceType::Button => "BUTTON",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
