//! Permission forest (backend input)
//!
//! The backend returns an ordered list of root nodes, each tagged with a
//! `type` discriminant. Children that cannot be decoded are dropped with a
//! warning so one malformed node never discards the rest of the tree.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::ResourceNode;
use crate::domain::value_objects::ResourceType;
use crate::error::{GrantError, GrantResult};

/// One node of the permission forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PermissionTreeNode {
    System(SystemPermissionNode),
    Menu(MenuPermissionNode),
    Resource(ResourcePermissionNode),
}

impl PermissionTreeNode {
    pub fn id(&self) -> &str {
        match self {
            PermissionTreeNode::System(node) => &node.id,
            PermissionTreeNode::Menu(node) => &node.id,
            PermissionTreeNode::Resource(node) => &node.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PermissionTreeNode::System(node) => &node.name,
            PermissionTreeNode::Menu(node) => &node.name,
            PermissionTreeNode::Resource(node) => &node.name,
        }
    }

    /// Whether the backend reports this node as already granted to the role
    pub fn is_selected(&self) -> bool {
        let selected = match self {
            PermissionTreeNode::System(node) => node.selected,
            PermissionTreeNode::Menu(node) => node.selected,
            PermissionTreeNode::Resource(node) => node.selected,
        };
        selected.unwrap_or(false)
    }

    pub fn children(&self) -> &[PermissionTreeNode] {
        match self {
            PermissionTreeNode::System(node) => &node.children,
            PermissionTreeNode::Menu(node) => &node.children,
            PermissionTreeNode::Resource(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPermissionNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<PermissionTreeNode>,
}

impl SystemPermissionNode {
    /// Key used in the system index: `systemId`, falling back to `id`
    pub fn key(&self) -> &str {
        self.system_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPermissionNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<PermissionTreeNode>,
}

impl MenuPermissionNode {
    /// Key used in the menu index: `menuId`, falling back to `id`
    pub fn key(&self) -> &str {
        self.menu_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePermissionNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl ResourcePermissionNode {
    /// Convert into an indexed resource owned by `menu_id`
    pub fn to_resource(&self, menu_id: &str) -> ResourceNode {
        ResourceNode {
            id: self.id.clone(),
            name: self.name.clone(),
            resource_id: self.resource_id.clone().unwrap_or_else(|| self.id.clone()),
            menu_id: menu_id.to_string(),
            resource_type: self.resource_type.unwrap_or_default(),
            code: self.code.clone().unwrap_or_default(),
        }
    }
}

/// Parse a forest document, dropping nodes that fail to decode.
///
/// Only a document that is not a JSON array is an error.
pub fn parse_forest(json: &str) -> GrantResult<Vec<PermissionTreeNode>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(items) => Ok(decode_nodes(items)),
        other => Err(GrantError::InvalidForest {
            message: format!("expected an array of nodes, found {}", json_kind(&other)),
        }),
    }
}

fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<PermissionTreeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(decode_nodes).unwrap_or_default())
}

fn decode_nodes(values: Vec<serde_json::Value>) -> Vec<PermissionTreeNode> {
    values
        .into_iter()
        .filter_map(
            |value| match serde_json::from_value::<PermissionTreeNode>(value) {
                Ok(node) => Some(node),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed permission node");
                    None
                }
            },
        )
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
