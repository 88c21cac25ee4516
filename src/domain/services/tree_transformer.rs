//! Tree Transformer
//!
//! Converts the backend permission forest into a [`PermissionIndex`]: flat
//! system/menu/resource maps plus parent/child adjacency. Pure functions; the
//! returned maps are always freshly allocated.

use std::collections::{BTreeSet, HashSet};

use tracing::warn;

use crate::domain::entities::{
    MenuNode, MenuPermissionNode, PermissionIndex, PermissionTreeNode, SystemNode,
    SystemPermissionNode,
};

/// Ids the backend flagged as already granted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedIds {
    pub menu_ids: BTreeSet<String>,
    pub resource_ids: BTreeSet<String>,
}

/// Build a fresh index from a forest in one depth-first walk.
///
/// Malformed shapes are skipped, never fatal: roots that are not systems,
/// resources outside a menu, systems nested in systems or menus, and menus
/// whose id was already visited (duplicates or cyclic chains).
pub fn transform(forest: &[PermissionTreeNode]) -> PermissionIndex {
    let mut builder = IndexBuilder::default();
    for node in forest {
        match node {
            PermissionTreeNode::System(system) => builder.add_system(system),
            PermissionTreeNode::Menu(menu) => {
                warn!(menu_id = %menu.key(), "skipping root menu outside any system");
            }
            PermissionTreeNode::Resource(resource) => {
                warn!(resource_id = %resource.id, "skipping root resource outside any menu");
            }
        }
    }
    builder.index
}

/// Collect the ids of every menu and resource flagged `selected`.
///
/// Systems are never reported: system selection is derived from menus.
pub fn extract_selected_ids(forest: &[PermissionTreeNode]) -> SelectedIds {
    let mut selected = SelectedIds::default();
    let mut stack: Vec<&PermissionTreeNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.is_selected() {
            match node {
                PermissionTreeNode::System(_) => {}
                PermissionTreeNode::Menu(menu) => {
                    selected.menu_ids.insert(menu.key().to_string());
                }
                PermissionTreeNode::Resource(resource) => {
                    selected.resource_ids.insert(resource.id.clone());
                }
            }
        }
        stack.extend(node.children().iter().rev());
    }

    selected
}

#[derive(Default)]
struct IndexBuilder {
    index: PermissionIndex,
    visited_menus: HashSet<String>,
}

impl IndexBuilder {
    fn add_system(&mut self, node: &SystemPermissionNode) {
        let system_id = node.key().to_string();
        if self.index.system_map.contains_key(&system_id) {
            warn!(system_id = %system_id, "skipping duplicate system");
            return;
        }

        let mut menus = Vec::new();
        for child in &node.children {
            match child {
                PermissionTreeNode::Menu(menu) => {
                    if let Some(menu_id) = self.add_menu(menu, &system_id, None, 0) {
                        menus.push(menu_id);
                    }
                }
                PermissionTreeNode::Resource(resource) => {
                    warn!(
                        resource_id = %resource.id,
                        system_id = %system_id,
                        "skipping resource attached directly to a system"
                    );
                }
                PermissionTreeNode::System(nested) => {
                    warn!(system_id = %nested.key(), "skipping nested system");
                }
            }
        }

        self.index.systems.push(system_id.clone());
        self.index.system_map.insert(
            system_id.clone(),
            SystemNode {
                id: node.id.clone(),
                name: node.name.clone(),
                system_id,
                menus,
            },
        );
    }

    fn add_menu(
        &mut self,
        node: &MenuPermissionNode,
        system_id: &str,
        parent_menu_id: Option<&str>,
        level: usize,
    ) -> Option<String> {
        let menu_id = node.key().to_string();
        if !self.visited_menus.insert(menu_id.clone()) {
            warn!(menu_id = %menu_id, "skipping menu already visited (duplicate or cycle)");
            return None;
        }

        let mut resources = Vec::new();
        for child in &node.children {
            if let PermissionTreeNode::Resource(raw) = child {
                if self.index.resource_map.contains_key(&raw.id) {
                    warn!(resource_id = %raw.id, menu_id = %menu_id, "skipping duplicate resource");
                    continue;
                }
                let resource = raw.to_resource(&menu_id);
                resources.push(resource.id.clone());
                self.index
                    .resource_menu_map
                    .insert(resource.id.clone(), menu_id.clone());
                self.index.resource_map.insert(resource.id.clone(), resource);
            }
        }

        if let Some(parent) = parent_menu_id {
            self.index
                .menu_parent_map
                .insert(menu_id.clone(), parent.to_string());
        }

        let mut children = Vec::new();
        for child in &node.children {
            match child {
                PermissionTreeNode::Menu(sub) => {
                    let added = self.add_menu(sub, system_id, Some(&menu_id), level + 1);
                    if let Some(child_id) = added {
                        children.push(child_id);
                    }
                }
                PermissionTreeNode::System(nested) => {
                    warn!(
                        system_id = %nested.key(),
                        menu_id = %menu_id,
                        "skipping system nested in menu"
                    );
                }
                PermissionTreeNode::Resource(_) => {}
            }
        }

        if !children.is_empty() {
            self.index
                .menu_children_map
                .insert(menu_id.clone(), children.clone());
        }

        self.index.menu_map.insert(
            menu_id.clone(),
            MenuNode {
                id: node.id.clone(),
                name: node.name.clone(),
                menu_id: menu_id.clone(),
                system_id: system_id.to_string(),
                parent_menu_id: parent_menu_id.map(str::to_owned),
                children,
                resources,
                level,
            },
        );

        Some(menu_id)
    }
}
