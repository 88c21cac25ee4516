//! Permission editor
//!
//! One editing session for one role: open a forest, apply toggles, save the
//! selection. The editor owns the store; all toggles go through the cascade
//! selector.

use tracing::info;

use crate::application::script::ToggleOp;
use crate::domain::entities::{PermissionState, PermissionTreeNode};
use crate::domain::ports::LoadError;
use crate::domain::services::{extract_selected_ids, transform, CascadeSelector};
use crate::domain::value_objects::SelectionPayload;

pub struct PermissionEditor {
    selector: CascadeSelector,
    state: PermissionState,
    role_id: Option<String>,
}

impl PermissionEditor {
    pub fn new(selector: CascadeSelector) -> Self {
        Self {
            selector,
            state: PermissionState::new(),
            role_id: None,
        }
    }

    /// Start editing `role_id`.
    ///
    /// The store is reset, the forest indexed, and the ids flagged `selected`
    /// in the forest are merged with `granted`. The first system becomes the
    /// active one.
    pub fn open(
        &mut self,
        role_id: impl Into<String>,
        forest: &[PermissionTreeNode],
        granted: Option<&SelectionPayload>,
    ) {
        let role_id = role_id.into();
        self.state.load_index(transform(forest));

        let flagged = extract_selected_ids(forest);
        self.state
            .seed_selection(std::iter::empty(), &flagged.menu_ids, &flagged.resource_ids);
        if let Some(granted) = granted {
            self.state.seed_selection(
                &granted.system_ids,
                &granted.menu_ids,
                &granted.resource_ids,
            );
        }

        let first_system = self.state.index().systems.first().cloned();
        self.state.set_active_system(first_system.as_deref());

        let stats = self.state.stats();
        info!(
            role_id = %role_id,
            systems = stats.total_system_count,
            menus = stats.total_menu_count,
            granted_menus = stats.selected_menu_count,
            "permission editor opened"
        );
        self.role_id = Some(role_id);
    }

    /// Drop the session; the store is back to its empty state
    pub fn close(&mut self) {
        if let Some(role_id) = self.role_id.take() {
            info!(role_id = %role_id, "permission editor closed");
        }
        self.state.reset();
    }

    pub fn role_id(&self) -> Option<&str> {
        self.role_id.as_deref()
    }

    pub fn state(&self) -> &PermissionState {
        &self.state
    }

    /// UI-only state (search keyword, focus) may be changed directly
    pub fn state_mut(&mut self) -> &mut PermissionState {
        &mut self.state
    }

    pub fn selector(&self) -> &CascadeSelector {
        &self.selector
    }

    pub async fn apply(&mut self, op: &ToggleOp) -> Result<(), LoadError> {
        let state = &mut self.state;
        let selector = &self.selector;
        match op {
            ToggleOp::SelectResource(id) => selector.select_resource(state, id),
            ToggleOp::DeselectResource(id) => selector.deselect_resource(state, id),
            ToggleOp::SelectMenu(id) => selector.select_menu(state, id).await?,
            ToggleOp::DeselectMenu(id) => selector.deselect_menu(state, id),
            ToggleOp::SelectSystem(id) => selector.select_system(state, id).await?,
            ToggleOp::DeselectSystem(id) => selector.deselect_system(state, id),
            ToggleOp::SelectAllInSystem(id) => selector.select_all_in_system(state, id).await?,
            ToggleOp::DeselectAllInSystem(id) => selector.deselect_all_in_system(state, id),
            ToggleOp::SelectAllResources(id) => selector.select_all_resources_in_menu(state, id),
            ToggleOp::DeselectAllResources(id) => {
                selector.deselect_all_resources_in_menu(state, id)
            }
            ToggleOp::ExpandMenu(id) => {
                selector.expand_menu(state, id).await?;
            }
        }
        Ok(())
    }

    /// The sorted payload to persist for the current role
    pub fn save(&self) -> SelectionPayload {
        let payload = self.state.payload();
        info!(
            role_id = self.role_id.as_deref().unwrap_or("-"),
            systems = payload.system_ids.len(),
            menus = payload.menu_ids.len(),
            resources = payload.resource_ids.len(),
            "permission selection saved"
        );
        payload
    }
}
