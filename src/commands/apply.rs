//! Apply command handler

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use rolegrant::domain::ports::{NoopResourceLoader, ResourceLoader, SelectionEventSink};
use rolegrant::infrastructure::{JsonDirResourceLoader, JsonEventSink, TracingEventSink};
use rolegrant::{parse_script, CascadeSelector, Config};

pub struct ApplyArgs<'a> {
    pub forest: &'a Path,
    pub granted: Option<&'a Path>,
    pub resources: Option<&'a Path>,
    pub script: &'a Path,
    pub role: &'a str,
}

pub async fn cmd_apply(args: ApplyArgs<'_>, config: &Config, json: bool) -> Result<()> {
    let source = fs::read_to_string(args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let ops = parse_script(&source)?;

    let resources_dir = args
        .resources
        .map(Path::to_path_buf)
        .or_else(|| config.loader.resources_dir.clone());
    let loader: Arc<dyn ResourceLoader> = match resources_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "loading menu resources from directory");
            Arc::new(JsonDirResourceLoader::new(dir))
        }
        None => Arc::new(NoopResourceLoader),
    };
    let events: Arc<dyn SelectionEventSink> = if json && config.output.events {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    };

    let selector = CascadeSelector::new(loader)
        .with_events(events)
        .with_policy(config.to_load_policy());
    let mut editor = super::open_editor(selector, args.role, args.forest, args.granted)?;

    for op in &ops {
        editor
            .apply(op)
            .await
            .with_context(|| format!("failed to apply `{op}`"))?;
    }

    let payload = editor.save();
    let stats = editor.state().stats();
    editor.close();

    if json {
        super::emit_json(serde_json::json!({
            "event": "data",
            "command": "apply",
            "operations": ops.len(),
            "payload": payload,
            "stats": stats,
        }))?;
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
