use anyhow::{Context, Result};
use depviz_core::GraphPayload;
use depviz_graph::{GraphEvent, LayoutConfig};
use std::fs;
use std::path::Path;

/// Reads layout settings; missing keys keep their defaults.
pub fn load_layout_config(path: &Path) -> Result<LayoutConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading layout config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&content)
        .with_context(|| format!("parsing layout config {}", path.display()))?;
    Ok(config)
}

pub fn load_payload(path: &Path) -> Result<GraphPayload> {
    GraphPayload::load(path).with_context(|| format!("loading graph payload {}", path.display()))
}

/// Reads a JSON array of events to replay after the initial load.
pub fn load_events(path: &Path) -> Result<Vec<GraphEvent>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading events {}", path.display()))?;
    let events: Vec<GraphEvent> = serde_json::from_str(&content)
        .with_context(|| format!("parsing events {}", path.display()))?;
    Ok(events)
}
