//! Cascade Selector
//!
//! Applies operator toggles to a [`PermissionState`] and keeps the three
//! selection sets consistent:
//!
//! - a selected resource implies its menu, every ancestor menu, and the system
//! - selecting a menu selects its loaded resources and cascades to every
//!   sub-menu, lazily loading resources that are not known yet
//! - deselecting the last selected child of a menu deselects that menu,
//!   recursively up to the root
//! - a system stays selected exactly while one of its menus is selected
//!
//! Every operation is a no-op when the target is already in the requested
//! state. Unknown ids are ignored.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::PermissionState;
use crate::domain::ports::{
    LoadError, NoopEventSink, ResourceLoader, SelectionCause, SelectionEvent, SelectionEventSink,
};

/// How many times an empty lazy load is attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Re-run the loader once when the first attempt returns no resources
    pub retry_on_empty: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            retry_on_empty: true,
        }
    }
}

impl LoadPolicy {
    pub fn max_attempts(&self) -> usize {
        if self.retry_on_empty {
            2
        } else {
            1
        }
    }
}

pub struct CascadeSelector {
    loader: Arc<dyn ResourceLoader>,
    events: Arc<dyn SelectionEventSink>,
    policy: LoadPolicy,
}

impl CascadeSelector {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            events: Arc::new(NoopEventSink),
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SelectionEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    // ---- resources --------------------------------------------------------

    /// Select one resource and make sure its menu, ancestors, and system are
    /// selected. Sibling resources are left alone.
    pub fn select_resource(&self, state: &mut PermissionState, resource_id: &str) {
        let Some(menu_id) = state.owning_menu(resource_id).map(str::to_owned) else {
            debug!(resource_id, "ignoring selection of unknown resource");
            return;
        };

        if state.insert_selected_resource(resource_id) {
            self.emit(SelectionEvent::ResourceSelected {
                resource_id: resource_id.to_string(),
            });
        }
        self.mark_menu(state, &menu_id, SelectionCause::Resource);
        self.propagate_selection_up(state, &menu_id);
    }

    /// Deselect one resource; its menu follows when nothing else keeps it.
    pub fn deselect_resource(&self, state: &mut PermissionState, resource_id: &str) {
        if !state.remove_selected_resource(resource_id) {
            return;
        }
        self.emit(SelectionEvent::ResourceDeselected {
            resource_id: resource_id.to_string(),
        });

        let Some(menu_id) = state.owning_menu(resource_id).map(str::to_owned) else {
            return;
        };
        if !state.menu_has_selected_content(&menu_id) {
            self.deselect_menu(state, &menu_id);
        }
    }

    // ---- menus ------------------------------------------------------------

    /// Select a menu, its loaded resources, and its whole sub-tree.
    ///
    /// Menus without known resources are loaded first. A loader rejection is
    /// returned after the menu (and its ancestors) were committed; calling
    /// `select_menu` again on the failed menu, or on any selected ancestor,
    /// retries the load and resumes the cascade.
    pub async fn select_menu(
        &self,
        state: &mut PermissionState,
        menu_id: &str,
    ) -> Result<(), LoadError> {
        if state.menu(menu_id).is_none() {
            debug!(menu_id, "ignoring selection of unknown menu");
            return Ok(());
        }
        if self.is_settled(state, menu_id) {
            return Ok(());
        }

        self.mark_menu(state, menu_id, SelectionCause::Explicit);
        self.propagate_selection_up(state, menu_id);
        self.fill_menu(state, menu_id).await?;

        let mut pending: Vec<String> = state.children_of(menu_id).iter().rev().cloned().collect();
        while let Some(current) = pending.pop() {
            if self.is_settled(state, &current) {
                continue;
            }
            self.mark_menu(state, &current, SelectionCause::Cascade);
            self.fill_menu(state, &current).await?;
            pending.extend(state.children_of(&current).iter().rev().cloned());
        }

        Ok(())
    }

    /// Deselect a menu, its resources, and its whole sub-tree; ancestors left
    /// without any selected child are deselected as well.
    pub fn deselect_menu(&self, state: &mut PermissionState, menu_id: &str) {
        if !state.is_menu_selected(menu_id) {
            return;
        }

        let mut touched_systems = BTreeSet::new();
        self.deselect_subtree(state, menu_id, &mut touched_systems);
        self.propagate_deselection_up(state, menu_id, &mut touched_systems);
        self.release_systems(state, touched_systems);
        state.prune_pending_resources();
    }

    /// Flip a menu's expansion and lazily load its resources when it opens.
    ///
    /// Loading here never changes the selection. Returns the new expansion
    /// state; unknown menus stay collapsed.
    pub async fn expand_menu(
        &self,
        state: &mut PermissionState,
        menu_id: &str,
    ) -> Result<bool, LoadError> {
        if state.menu(menu_id).is_none() {
            debug!(menu_id, "ignoring expansion of unknown menu");
            return Ok(false);
        }
        let expanded = state.toggle_menu_expand(menu_id);
        if expanded {
            self.ensure_resources(state, menu_id).await?;
        }
        Ok(expanded)
    }

    // ---- systems ------------------------------------------------------------

    /// Select a system through its top-level menus; a system without menus
    /// stays unselected.
    pub async fn select_system(
        &self,
        state: &mut PermissionState,
        system_id: &str,
    ) -> Result<(), LoadError> {
        let Some(menus) = state.system(system_id).map(|system| system.menus.clone()) else {
            debug!(system_id, "ignoring selection of unknown system");
            return Ok(());
        };
        if menus.is_empty() {
            debug!(system_id, "ignoring selection of system without menus");
            return Ok(());
        }

        if state.insert_selected_system(system_id) {
            self.emit(SelectionEvent::SystemSelected {
                system_id: system_id.to_string(),
            });
        }
        for menu_id in &menus {
            self.select_menu(state, menu_id).await?;
        }
        Ok(())
    }

    pub fn deselect_system(&self, state: &mut PermissionState, system_id: &str) {
        let Some(menus) = state.system(system_id).map(|system| system.menus.clone()) else {
            debug!(system_id, "ignoring deselection of unknown system");
            return;
        };

        for menu_id in &menus {
            self.deselect_menu(state, menu_id);
        }
        if state.remove_selected_system(system_id) {
            self.emit(SelectionEvent::SystemDeselected {
                system_id: system_id.to_string(),
            });
        }
    }

    // ---- batch helpers ----------------------------------------------------------

    pub async fn select_all_in_system(
        &self,
        state: &mut PermissionState,
        system_id: &str,
    ) -> Result<(), LoadError> {
        let menus = state
            .system(system_id)
            .map(|system| system.menus.clone())
            .unwrap_or_default();
        for menu_id in &menus {
            self.select_menu(state, menu_id).await?;
        }
        Ok(())
    }

    pub fn deselect_all_in_system(&self, state: &mut PermissionState, system_id: &str) {
        let menus = state
            .system(system_id)
            .map(|system| system.menus.clone())
            .unwrap_or_default();
        for menu_id in &menus {
            self.deselect_menu(state, menu_id);
        }
    }

    pub fn select_all_resources_in_menu(&self, state: &mut PermissionState, menu_id: &str) {
        let resources = state.resource_ids_of(menu_id).to_vec();
        for resource_id in &resources {
            self.select_resource(state, resource_id);
        }
    }

    pub fn deselect_all_resources_in_menu(&self, state: &mut PermissionState, menu_id: &str) {
        let resources = state.resource_ids_of(menu_id).to_vec();
        for resource_id in &resources {
            self.deselect_resource(state, resource_id);
        }
    }

    // ---- internals ----------------------------------------------------------------

    fn emit(&self, event: SelectionEvent) {
        self.events.on_event(event);
    }

    /// Selected, and no selected menu in its sub-tree is waiting for a retry
    /// of its lazy load. Unselected descendants never unsettle a menu.
    fn is_settled(&self, state: &PermissionState, menu_id: &str) -> bool {
        if !state.is_menu_selected(menu_id) {
            return false;
        }
        if !state.has_failed_loads() {
            return true;
        }

        let mut pending = vec![menu_id];
        while let Some(current) = pending.pop() {
            if state.has_failed_load(current) {
                return false;
            }
            pending.extend(
                state
                    .children_of(current)
                    .iter()
                    .filter(|child| state.is_menu_selected(child))
                    .map(String::as_str),
            );
        }
        true
    }

    /// Add a menu and its system to the selection, nothing else
    fn mark_menu(&self, state: &mut PermissionState, menu_id: &str, cause: SelectionCause) {
        let Some(system_id) = state.menu(menu_id).map(|menu| menu.system_id.clone()) else {
            return;
        };
        if state.insert_selected_menu(menu_id) {
            debug!(menu_id, cause = cause.as_str(), "menu selected");
            self.emit(SelectionEvent::MenuSelected {
                menu_id: menu_id.to_string(),
                cause,
            });
        }
        if state.insert_selected_system(&system_id) {
            self.emit(SelectionEvent::SystemSelected { system_id });
        }
    }

    fn select_own_resources(&self, state: &mut PermissionState, menu_id: &str) {
        let resources = state.resource_ids_of(menu_id).to_vec();
        for resource_id in resources {
            if state.insert_selected_resource(&resource_id) {
                self.emit(SelectionEvent::ResourceSelected { resource_id });
            }
        }
    }

    async fn fill_menu(&self, state: &mut PermissionState, menu_id: &str) -> Result<(), LoadError> {
        self.ensure_resources(state, menu_id).await?;
        self.select_own_resources(state, menu_id);
        Ok(())
    }

    /// Run the lazy load for a menu that has never produced resources.
    ///
    /// An empty answer is retried according to the policy; after that the
    /// menu counts as loaded and is never fetched again.
    async fn ensure_resources(
        &self,
        state: &mut PermissionState,
        menu_id: &str,
    ) -> Result<(), LoadError> {
        if !state.needs_resource_load(menu_id) {
            return Ok(());
        }

        for attempt in 1..=self.policy.max_attempts() {
            debug!(menu_id, attempt, "loading menu resources");
            self.emit(SelectionEvent::ResourcesLoading {
                menu_id: menu_id.to_string(),
                attempt,
            });

            let resources = match self.loader.load_resources(menu_id).await {
                Ok(resources) => resources,
                Err(err) => {
                    warn!(menu_id, error = %err, "resource load failed");
                    state.mark_load_failed(menu_id);
                    self.emit(SelectionEvent::ResourceLoadFailed {
                        menu_id: menu_id.to_string(),
                        error: err.to_string(),
                    });
                    return Err(err);
                }
            };

            let count = state.install_resources(menu_id, resources);
            self.emit(SelectionEvent::ResourcesLoaded {
                menu_id: menu_id.to_string(),
                count,
            });
            if count > 0 {
                break;
            }
        }

        state.mark_resources_loaded(menu_id);
        Ok(())
    }

    /// Select every unselected ancestor of `menu_id` together with the
    /// ancestor's own loaded resources. Siblings are not touched.
    fn propagate_selection_up(&self, state: &mut PermissionState, menu_id: &str) {
        let mut seen = HashSet::new();
        let mut current = menu_id.to_string();

        while let Some(parent) = state.parent_of(&current).map(str::to_owned) {
            if !seen.insert(parent.clone()) {
                warn!(menu_id = %parent, "cyclic menu parent chain");
                break;
            }
            if !state.is_menu_selected(&parent) {
                self.mark_menu(state, &parent, SelectionCause::Ancestor);
                self.select_own_resources(state, &parent);
            }
            current = parent;
        }
    }

    /// Remove a menu, its resources, and every selected descendant.
    fn deselect_subtree(
        &self,
        state: &mut PermissionState,
        menu_id: &str,
        touched_systems: &mut BTreeSet<String>,
    ) {
        let mut pending = vec![menu_id.to_string()];

        while let Some(current) = pending.pop() {
            if !state.remove_selected_menu(&current) {
                continue;
            }
            debug!(menu_id = %current, "menu deselected");
            self.emit(SelectionEvent::MenuDeselected {
                menu_id: current.clone(),
            });
            state.clear_load_failure(&current);
            if let Some(menu) = state.menu(&current) {
                touched_systems.insert(menu.system_id.clone());
            }

            let resources = state.resource_ids_of(&current).to_vec();
            for resource_id in resources {
                if state.remove_selected_resource(&resource_id) {
                    self.emit(SelectionEvent::ResourceDeselected { resource_id });
                }
            }

            pending.extend(state.children_of(&current).iter().rev().cloned());
        }
    }

    /// Walk up from `menu_id`, deselecting each ancestor whose direct children
    /// are now all deselected. Stops at the first ancestor that keeps a child.
    fn propagate_deselection_up(
        &self,
        state: &mut PermissionState,
        menu_id: &str,
        touched_systems: &mut BTreeSet<String>,
    ) {
        let mut seen = HashSet::new();
        let mut current = menu_id.to_string();

        while let Some(parent) = state.parent_of(&current).map(str::to_owned) {
            if !seen.insert(parent.clone()) {
                warn!(menu_id = %parent, "cyclic menu parent chain");
                break;
            }
            if !state.is_menu_selected(&parent) {
                break;
            }
            let keeps_child = state
                .children_of(&parent)
                .iter()
                .any(|child| state.is_menu_selected(child));
            if keeps_child {
                break;
            }
            self.deselect_subtree(state, &parent, touched_systems);
            current = parent;
        }
    }

    /// Drop systems that no longer have any selected menu
    fn release_systems(&self, state: &mut PermissionState, systems: BTreeSet<String>) {
        for system_id in systems {
            if !state.system_has_selected_menu(&system_id)
                && state.remove_selected_system(&system_id)
            {
                debug!(system_id = %system_id, "system released");
                self.emit(SelectionEvent::SystemDeselected { system_id });
            }
        }
    }
}
