//! Domain Entities
//!
//! - `PermissionTreeNode` - The backend forest, as received
//! - `SystemNode` / `MenuNode` / `ResourceNode` - Indexed nodes
//! - `PermissionIndex` - Flat maps and adjacency built from a forest
//! - `PermissionState` - Selection sets and UI state for one editing session

mod forest;
mod index;
mod node;
mod permission_state;

pub use forest::{
    parse_forest, MenuPermissionNode, PermissionTreeNode, ResourcePermissionNode,
    SystemPermissionNode,
};
pub use index::PermissionIndex;
pub use node::{MenuNode, ResourceNode, SystemNode};
pub use permission_state::{MenuTreeNode, PermissionState};
