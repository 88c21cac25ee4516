//! Aggregate selection counts shown next to the permission tree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionStats {
    pub selected_system_count: usize,
    pub selected_menu_count: usize,
    pub selected_resource_count: usize,
    pub total_system_count: usize,
    pub total_menu_count: usize,
    pub total_resource_count: usize,
}
