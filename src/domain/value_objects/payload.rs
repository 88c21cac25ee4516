//! Selection payload
//!
//! The triple persisted when the operator saves a role's permissions, and the
//! shape of the "already granted" ids the backend returns when the editor opens.

use serde::{Deserialize, Serialize};

/// Ids granted to a role, one list per permission granularity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    #[serde(default)]
    pub system_ids: Vec<String>,
    #[serde(default)]
    pub menu_ids: Vec<String>,
    #[serde(default)]
    pub resource_ids: Vec<String>,
}

impl SelectionPayload {
    pub fn is_empty(&self) -> bool {
        self.system_ids.is_empty() && self.menu_ids.is_empty() && self.resource_ids.is_empty()
    }
}
