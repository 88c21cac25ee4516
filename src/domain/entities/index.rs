//! Permission index
//!
//! Flat maps keyed by id plus adjacency maps. Built fresh by the tree
//! transformer for every forest; resources are added incrementally as menus
//! are lazily loaded.

use std::collections::HashMap;

use crate::domain::entities::{MenuNode, ResourceNode, SystemNode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionIndex {
    /// System ids in forest order
    pub systems: Vec<String>,
    pub system_map: HashMap<String, SystemNode>,
    pub menu_map: HashMap<String, MenuNode>,
    pub resource_map: HashMap<String, ResourceNode>,
    /// menu id -> parent menu id
    pub menu_parent_map: HashMap<String, String>,
    /// menu id -> direct child menu ids
    pub menu_children_map: HashMap<String, Vec<String>>,
    /// resource id -> owning menu id
    pub resource_menu_map: HashMap<String, String>,
}

impl PermissionIndex {
    pub fn is_empty(&self) -> bool {
        self.system_map.is_empty() && self.menu_map.is_empty() && self.resource_map.is_empty()
    }

    /// Systems in forest order
    pub fn systems(&self) -> impl Iterator<Item = &SystemNode> {
        self.systems.iter().filter_map(|id| self.system_map.get(id))
    }

    pub fn parent_of(&self, menu_id: &str) -> Option<&str> {
        self.menu_parent_map.get(menu_id).map(String::as_str)
    }

    pub fn children_of(&self, menu_id: &str) -> &[String] {
        self.menu_children_map
            .get(menu_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn owning_menu(&self, resource_id: &str) -> Option<&str> {
        self.resource_menu_map.get(resource_id).map(String::as_str)
    }

    /// Replace the resources owned by `menu_id` with `resources`.
    ///
    /// Every installed resource is re-homed to `menu_id`. A resource id that
    /// already belongs to another menu is skipped. Returns the number of
    /// resources the menu owns afterwards; 0 for an unknown menu.
    pub fn install_resources(&mut self, menu_id: &str, resources: Vec<ResourceNode>) -> usize {
        let Some(menu) = self.menu_map.get_mut(menu_id) else {
            return 0;
        };

        for old in menu.resources.drain(..) {
            self.resource_map.remove(&old);
            self.resource_menu_map.remove(&old);
        }

        for mut resource in resources {
            if let Some(owner) = self.resource_menu_map.get(&resource.id) {
                if owner != menu_id {
                    tracing::warn!(
                        resource_id = %resource.id,
                        owner = %owner,
                        menu_id,
                        "skipping resource already owned by another menu"
                    );
                }
                continue;
            }
            resource.menu_id = menu_id.to_string();
            menu.resources.push(resource.id.clone());
            self.resource_menu_map
                .insert(resource.id.clone(), menu_id.to_string());
            self.resource_map.insert(resource.id.clone(), resource);
        }

        menu.resources.len()
    }
}
