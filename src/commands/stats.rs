//! Stats command handler

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use rolegrant::domain::ports::NoopResourceLoader;
use rolegrant::{CascadeSelector, PermissionStats};

pub fn cmd_stats(forest: &Path, granted: Option<&Path>, json: bool) -> Result<()> {
    let selector = CascadeSelector::new(Arc::new(NoopResourceLoader));
    let editor = super::open_editor(selector, "stats", forest, granted)?;
    let stats = editor.state().stats();

    if json {
        super::emit_json(serde_json::json!({
            "event": "data",
            "command": "stats",
            "stats": stats,
        }))?;
        return Ok(());
    }

    print!("{}", render(&stats));
    Ok(())
}

fn render(stats: &PermissionStats) -> String {
    format!(
        "systems    {}/{}\nmenus      {}/{}\nresources  {}/{}\n",
        stats.selected_system_count,
        stats.total_system_count,
        stats.selected_menu_count,
        stats.total_menu_count,
        stats.selected_resource_count,
        stats.total_resource_count,
    )
}
