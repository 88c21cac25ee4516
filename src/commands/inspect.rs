//! Inspect command handler

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde_json::{json, Value};

use rolegrant::domain::entities::MenuTreeNode;
use rolegrant::domain::ports::NoopResourceLoader;
use rolegrant::{CascadeSelector, PermissionState};

pub fn cmd_inspect(
    forest: &Path,
    granted: Option<&Path>,
    system: Option<&str>,
    keyword: Option<&str>,
    json: bool,
) -> Result<()> {
    let selector = CascadeSelector::new(Arc::new(NoopResourceLoader));
    let mut editor = super::open_editor(selector, "inspect", forest, granted)?;

    let state = editor.state_mut();
    if let Some(system_id) = system {
        if state.system(system_id).is_none() {
            bail!("unknown system '{system_id}'");
        }
        state.set_active_system(Some(system_id));
    }
    state.set_search_keyword(keyword.unwrap_or_default());

    let state = editor.state();
    if json {
        super::emit_json(json!({
            "event": "data",
            "command": "inspect",
            "system_id": state.active_system_id(),
            "keyword": state.search_keyword(),
            "menus": state
                .current_system_menus()
                .iter()
                .map(|node| menu_json(state, node))
                .collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    print!("{}", render(state));
    Ok(())
}

fn menu_json(state: &PermissionState, node: &MenuTreeNode<'_>) -> Value {
    let menu = node.menu;
    json!({
        "menu_id": menu.menu_id,
        "name": menu.name,
        "level": menu.level,
        "selected": state.is_menu_selected(&menu.menu_id),
        "resources": state
            .resources_of_menu(&menu.menu_id)
            .into_iter()
            .map(|resource| json!({
                "id": resource.id,
                "name": resource.name,
                "type": resource.resource_type,
                "code": resource.code,
                "selected": state.is_resource_selected(&resource.id),
            }))
            .collect::<Vec<_>>(),
        "children": node
            .children
            .iter()
            .map(|child| menu_json(state, child))
            .collect::<Vec<_>>(),
    })
}

fn render(state: &PermissionState) -> String {
    let mut out = String::new();
    let Some(system) = state.active_system_id().and_then(|id| state.system(id)) else {
        out.push_str("no systems\n");
        return out;
    };

    let _ = writeln!(
        out,
        "{} {} ({})",
        mark(state.is_system_selected(&system.system_id)),
        system.name,
        system.system_id
    );
    for node in state.current_system_menus() {
        render_menu(state, &node, 1, &mut out);
    }
    out
}

fn render_menu(state: &PermissionState, node: &MenuTreeNode<'_>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let menu = node.menu;
    let _ = writeln!(
        out,
        "{indent}{} {} ({})",
        mark(state.is_menu_selected(&menu.menu_id)),
        menu.name,
        menu.menu_id
    );
    for resource in state.resources_of_menu(&menu.menu_id) {
        let _ = writeln!(
            out,
            "{indent}    - {} {} {} {}",
            mark(state.is_resource_selected(&resource.id)),
            resource.name,
            resource.resource_type,
            resource.code
        );
    }
    for child in &node.children {
        render_menu(state, child, depth + 1, out);
    }
}

fn mark(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}
