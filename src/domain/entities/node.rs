//! Permission nodes
//!
//! The three granularities an operator can grant to a role. Nodes live in the
//! flat maps of [`PermissionIndex`](super::PermissionIndex); relationships are
//! stored as ids, never as embedded nodes.

use serde::Serialize;

use crate::domain::value_objects::ResourceType;

/// A top-level application module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemNode {
    pub id: String,
    pub name: String,
    pub system_id: String,
    /// Top-level menu ids in forest order
    pub menus: Vec<String>,
}

/// A navigable menu entry, possibly nested under another menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: String,
    pub name: String,
    pub menu_id: String,
    pub system_id: String,
    pub parent_menu_id: Option<String>,
    /// Direct sub-menu ids in forest order
    pub children: Vec<String>,
    /// Resource ids owned by this menu; empty until lazily loaded
    pub resources: Vec<String>,
    /// Nesting depth, 0 for menus directly under a system
    pub level: usize,
}

impl MenuNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A leaf permission: one API endpoint or one UI button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: String,
    pub name: String,
    pub resource_id: String,
    pub menu_id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub code: String,
}

impl ResourceNode {
    /// Create a button resource whose business id equals its node id
    pub fn new(id: impl Into<String>, name: impl Into<String>, menu_id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            resource_id: id.clone(),
            id,
            name: name.into(),
            menu_id: menu_id.into(),
            resource_type: ResourceType::default(),
            code: String::new(),
        }
    }

    pub fn with_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}
