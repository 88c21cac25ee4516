//! Selection state store
//!
//! Owns the permission index, the three selection sets, and UI-only state
//! (expansion, search keyword, active system/menu). The store is passive: it
//! never cascades. All selection changes go through
//! [`CascadeSelector`](crate::domain::services::CascadeSelector).

use std::collections::{BTreeSet, HashSet};

use crate::domain::entities::{MenuNode, PermissionIndex, ResourceNode, SystemNode};
use crate::domain::value_objects::{PermissionStats, SelectionPayload};

/// A menu together with the descendants that survived a search filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTreeNode<'a> {
    pub menu: &'a MenuNode,
    pub children: Vec<MenuTreeNode<'a>>,
}

impl MenuTreeNode<'_> {
    /// Depth-first menu ids of this node and its retained descendants
    pub fn menu_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.menu.menu_id.as_str()];
        for child in &self.children {
            ids.extend(child.menu_ids());
        }
        ids
    }
}

#[derive(Debug, Default)]
pub struct PermissionState {
    index: PermissionIndex,

    selected_system_ids: BTreeSet<String>,
    selected_menu_ids: BTreeSet<String>,
    selected_resource_ids: BTreeSet<String>,
    /// Granted resource ids whose menu has not been loaded yet
    pending_resource_ids: BTreeSet<String>,
    expanded_menu_ids: HashSet<String>,

    search_keyword: String,
    active_system_id: Option<String>,
    active_menu_id: Option<String>,

    /// Menus whose lazy load completed (even with zero resources)
    loaded_menu_ids: HashSet<String>,
    /// Menus whose last lazy load was rejected by the loader
    failed_load_menu_ids: HashSet<String>,
}

impl PermissionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every map and set, leaving the store as freshly constructed
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the index; all selection and UI state is cleared first
    pub fn load_index(&mut self, index: PermissionIndex) {
        self.reset();
        self.index = index;
    }

    /// Merge already-granted ids into the selection sets.
    ///
    /// Systems of seeded menus are derived; `system_ids` is merged as given.
    /// Resource ids the index does not know yet are held back until their
    /// menu is loaded, and only join the selection if that menu is selected
    /// by then.
    pub fn seed_selection<'a>(
        &mut self,
        system_ids: impl IntoIterator<Item = &'a String>,
        menu_ids: impl IntoIterator<Item = &'a String>,
        resource_ids: impl IntoIterator<Item = &'a String>,
    ) {
        self.selected_system_ids
            .extend(system_ids.into_iter().cloned());
        for menu_id in menu_ids {
            if let Some(menu) = self.index.menu_map.get(menu_id) {
                self.selected_system_ids.insert(menu.system_id.clone());
            }
            self.selected_menu_ids.insert(menu_id.clone());
        }
        for resource_id in resource_ids {
            if self.index.resource_map.contains_key(resource_id) {
                self.selected_resource_ids.insert(resource_id.clone());
            } else {
                self.pending_resource_ids.insert(resource_id.clone());
            }
        }
    }

    pub fn index(&self) -> &PermissionIndex {
        &self.index
    }

    pub fn system(&self, system_id: &str) -> Option<&SystemNode> {
        self.index.system_map.get(system_id)
    }

    pub fn menu(&self, menu_id: &str) -> Option<&MenuNode> {
        self.index.menu_map.get(menu_id)
    }

    pub fn resource(&self, resource_id: &str) -> Option<&ResourceNode> {
        self.index.resource_map.get(resource_id)
    }

    pub fn systems(&self) -> Vec<&SystemNode> {
        self.index.systems().collect()
    }

    pub fn parent_of(&self, menu_id: &str) -> Option<&str> {
        self.index.parent_of(menu_id)
    }

    pub fn children_of(&self, menu_id: &str) -> &[String] {
        self.index.children_of(menu_id)
    }

    pub fn owning_menu(&self, resource_id: &str) -> Option<&str> {
        self.index.owning_menu(resource_id)
    }

    /// Resource ids owned by `menu_id` (empty for unknown or unloaded menus)
    pub fn resource_ids_of(&self, menu_id: &str) -> &[String] {
        self.menu(menu_id)
            .map(|menu| menu.resources.as_slice())
            .unwrap_or(&[])
    }

    // ---- views ----------------------------------------------------------

    /// Top-level menus of a system
    pub fn menus_of_system(&self, system_id: &str) -> Vec<&MenuNode> {
        self.system(system_id)
            .map(|system| {
                system
                    .menus
                    .iter()
                    .filter_map(|id| self.index.menu_map.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Menu tree of a system filtered by a case-insensitive name match.
    ///
    /// A menu with matching descendants keeps only those descendants; a menu
    /// that matches itself but has no matching descendant keeps its whole
    /// subtree. A blank keyword returns the unfiltered tree.
    pub fn filtered_menus(&self, system_id: &str, keyword: &str) -> Vec<MenuTreeNode<'_>> {
        let keyword = keyword.trim().to_lowercase();
        let roots = self.menus_of_system(system_id);
        if keyword.is_empty() {
            return roots.into_iter().map(|menu| self.full_tree(menu)).collect();
        }
        roots
            .into_iter()
            .filter_map(|menu| self.filter_tree(menu, &keyword))
            .collect()
    }

    fn full_tree<'a>(&'a self, menu: &'a MenuNode) -> MenuTreeNode<'a> {
        MenuTreeNode {
            menu,
            children: menu
                .children
                .iter()
                .filter_map(|id| self.index.menu_map.get(id))
                .map(|child| self.full_tree(child))
                .collect(),
        }
    }

    fn filter_tree<'a>(&'a self, menu: &'a MenuNode, keyword: &str) -> Option<MenuTreeNode<'a>> {
        let children: Vec<MenuTreeNode<'a>> = menu
            .children
            .iter()
            .filter_map(|id| self.index.menu_map.get(id))
            .filter_map(|child| self.filter_tree(child, keyword))
            .collect();

        if !children.is_empty() {
            return Some(MenuTreeNode { menu, children });
        }
        if menu.name.to_lowercase().contains(keyword) {
            return Some(self.full_tree(menu));
        }
        None
    }

    pub fn resources_of_menu(&self, menu_id: &str) -> Vec<&ResourceNode> {
        self.resource_ids_of(menu_id)
            .iter()
            .filter_map(|id| self.index.resource_map.get(id))
            .collect()
    }

    /// Menus of the active system, filtered by the current search keyword
    pub fn current_system_menus(&self) -> Vec<MenuTreeNode<'_>> {
        match &self.active_system_id {
            Some(system_id) => self.filtered_menus(system_id, &self.search_keyword),
            None => Vec::new(),
        }
    }

    /// Resources of the active menu
    pub fn current_menu_resources(&self) -> Vec<&ResourceNode> {
        match &self.active_menu_id {
            Some(menu_id) => self.resources_of_menu(menu_id),
            None => Vec::new(),
        }
    }

    pub fn stats(&self) -> PermissionStats {
        PermissionStats {
            selected_system_count: self.selected_system_ids.len(),
            selected_menu_count: self.selected_menu_ids.len(),
            selected_resource_count: self.selected_resource_ids.len(),
            total_system_count: self.index.system_map.len(),
            total_menu_count: self.index.menu_map.len(),
            total_resource_count: self.index.resource_map.len(),
        }
    }

    /// The triple persisted when the operator saves, sorted by id.
    ///
    /// Granted resources still waiting for their menu's load are kept only
    /// while some selected menu is unloaded and may own them.
    pub fn payload(&self) -> SelectionPayload {
        let mut resource_ids = self.selected_resource_ids.clone();
        if self.has_unloaded_selected_menu() {
            resource_ids.extend(self.pending_resource_ids.iter().cloned());
        }
        SelectionPayload {
            system_ids: self.selected_system_ids.iter().cloned().collect(),
            menu_ids: self.selected_menu_ids.iter().cloned().collect(),
            resource_ids: resource_ids.into_iter().collect(),
        }
    }

    // ---- selection queries ----------------------------------------------

    pub fn selected_system_ids(&self) -> &BTreeSet<String> {
        &self.selected_system_ids
    }

    pub fn selected_menu_ids(&self) -> &BTreeSet<String> {
        &self.selected_menu_ids
    }

    pub fn selected_resource_ids(&self) -> &BTreeSet<String> {
        &self.selected_resource_ids
    }

    pub fn is_system_selected(&self, system_id: &str) -> bool {
        self.selected_system_ids.contains(system_id)
    }

    pub fn is_menu_selected(&self, menu_id: &str) -> bool {
        self.selected_menu_ids.contains(menu_id)
    }

    pub fn is_resource_selected(&self, resource_id: &str) -> bool {
        self.selected_resource_ids.contains(resource_id)
    }

    /// Whether any of the menu's own resources or direct children is selected
    pub fn menu_has_selected_content(&self, menu_id: &str) -> bool {
        self.resource_ids_of(menu_id)
            .iter()
            .any(|id| self.is_resource_selected(id))
            || self
                .children_of(menu_id)
                .iter()
                .any(|id| self.is_menu_selected(id))
    }

    pub fn system_has_selected_menu(&self, system_id: &str) -> bool {
        self.selected_menu_ids.iter().any(|id| {
            self.index
                .menu_map
                .get(id)
                .is_some_and(|menu| menu.system_id == system_id)
        })
    }

    // ---- UI state -------------------------------------------------------

    /// Flip a menu's expansion; returns the new state
    pub fn toggle_menu_expand(&mut self, menu_id: &str) -> bool {
        if self.expanded_menu_ids.remove(menu_id) {
            false
        } else {
            self.expanded_menu_ids.insert(menu_id.to_string());
            true
        }
    }

    pub fn is_menu_expanded(&self, menu_id: &str) -> bool {
        self.expanded_menu_ids.contains(menu_id)
    }

    pub fn expanded_menu_ids(&self) -> &HashSet<String> {
        &self.expanded_menu_ids
    }

    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) {
        self.search_keyword = keyword.into();
    }

    pub fn active_system_id(&self) -> Option<&str> {
        self.active_system_id.as_deref()
    }

    /// Focus a system; the active menu is cleared when the system changes
    pub fn set_active_system(&mut self, system_id: Option<&str>) {
        if self.active_system_id.as_deref() != system_id {
            self.active_menu_id = None;
        }
        self.active_system_id = system_id.map(str::to_owned);
    }

    pub fn active_menu_id(&self) -> Option<&str> {
        self.active_menu_id.as_deref()
    }

    pub fn set_active_menu(&mut self, menu_id: Option<&str>) {
        self.active_menu_id = menu_id.map(str::to_owned);
    }

    // ---- lazy-load bookkeeping -------------------------------------------

    /// True when the menu exists, owns no resources, and was never loaded
    pub fn needs_resource_load(&self, menu_id: &str) -> bool {
        self.menu(menu_id)
            .is_some_and(|menu| menu.resources.is_empty())
            && !self.loaded_menu_ids.contains(menu_id)
    }

    pub fn has_failed_load(&self, menu_id: &str) -> bool {
        self.failed_load_menu_ids.contains(menu_id)
    }

    pub fn has_failed_loads(&self) -> bool {
        !self.failed_load_menu_ids.is_empty()
    }

    /// Granted resource ids not resolved to a loaded menu yet
    pub fn pending_resource_ids(&self) -> &BTreeSet<String> {
        &self.pending_resource_ids
    }

    fn has_unloaded_selected_menu(&self) -> bool {
        self.selected_menu_ids
            .iter()
            .any(|id| self.needs_resource_load(id))
    }

    // ---- mutation primitives (cascade-free) --------------------------------

    /// Install lazily loaded resources and resolve pending grants they own
    pub(crate) fn install_resources(
        &mut self,
        menu_id: &str,
        resources: Vec<ResourceNode>,
    ) -> usize {
        let count = self.index.install_resources(menu_id, resources);
        if self.pending_resource_ids.is_empty() {
            return count;
        }

        let keep = self.selected_menu_ids.contains(menu_id);
        let owned = self
            .index
            .menu_map
            .get(menu_id)
            .map(|menu| menu.resources.as_slice())
            .unwrap_or(&[]);
        for resource_id in owned {
            if self.pending_resource_ids.remove(resource_id) && keep {
                self.selected_resource_ids.insert(resource_id.clone());
            }
        }
        count
    }

    /// Forget pending grants once no selected menu is left to own them
    pub(crate) fn prune_pending_resources(&mut self) {
        if !self.has_unloaded_selected_menu() {
            self.pending_resource_ids.clear();
        }
    }

    pub(crate) fn mark_resources_loaded(&mut self, menu_id: &str) {
        self.failed_load_menu_ids.remove(menu_id);
        self.loaded_menu_ids.insert(menu_id.to_string());
    }

    pub(crate) fn mark_load_failed(&mut self, menu_id: &str) {
        self.failed_load_menu_ids.insert(menu_id.to_string());
    }

    pub(crate) fn clear_load_failure(&mut self, menu_id: &str) {
        self.failed_load_menu_ids.remove(menu_id);
    }

    pub(crate) fn insert_selected_system(&mut self, system_id: &str) -> bool {
        self.selected_system_ids.insert(system_id.to_string())
    }

    pub(crate) fn remove_selected_system(&mut self, system_id: &str) -> bool {
        self.selected_system_ids.remove(system_id)
    }

    pub(crate) fn insert_selected_menu(&mut self, menu_id: &str) -> bool {
        self.selected_menu_ids.insert(menu_id.to_string())
    }

    pub(crate) fn remove_selected_menu(&mut self, menu_id: &str) -> bool {
        self.selected_menu_ids.remove(menu_id)
    }

    pub(crate) fn insert_selected_resource(&mut self, resource_id: &str) -> bool {
        self.selected_resource_ids.insert(resource_id.to_string())
    }

    pub(crate) fn remove_selected_resource(&mut self, resource_id: &str) -> bool {
        self.selected_resource_ids.remove(resource_id)
    }
}
