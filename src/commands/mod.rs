//! Command handlers

pub mod apply;
pub mod inspect;
pub mod stats;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use rolegrant::domain::entities::PermissionTreeNode;
use rolegrant::{parse_forest, CascadeSelector, PermissionEditor, SelectionPayload};

pub(crate) fn read_forest(path: &Path) -> Result<Vec<PermissionTreeNode>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read forest {}", path.display()))?;
    parse_forest(&json).with_context(|| format!("failed to parse forest {}", path.display()))
}

pub(crate) fn read_granted(path: Option<&Path>) -> Result<Option<SelectionPayload>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read granted ids {}", path.display()))?;
    let payload = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse granted ids {}", path.display()))?;
    Ok(Some(payload))
}

/// Open an editing session for `role_id` from files on disk
pub(crate) fn open_editor(
    selector: CascadeSelector,
    role_id: &str,
    forest: &Path,
    granted: Option<&Path>,
) -> Result<PermissionEditor> {
    let forest = read_forest(forest)?;
    let granted = read_granted(granted)?;

    let mut editor = PermissionEditor::new(selector);
    editor.open(role_id, &forest, granted.as_ref());
    Ok(editor)
}

/// Print one JSON document on stdout
pub(crate) fn emit_json(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}
