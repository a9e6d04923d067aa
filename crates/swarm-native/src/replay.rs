//! Loading of recorded event logs and configuration files.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use swarm_core::{ShapeEvent, SwarmConfig};

/// One transport message and the frame on which it arrived.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimedEvent {
    pub frame: u64,
    pub message: ShapeEvent,
}

/// Parse a JSON-lines event log. Blank lines are skipped. The result is
/// ordered by frame; events sharing a frame keep their file order.
pub fn parse_events(text: &str) -> Result<Vec<TimedEvent>> {
    let mut events = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: TimedEvent =
            serde_json::from_str(line).with_context(|| format!("line {}", n + 1))?;
        events.push(event);
    }
    events.sort_by_key(|e| e.frame);
    Ok(events)
}

pub fn load_events(path: &Path) -> Result<Vec<TimedEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {}", path.display()))?;
    let events =
        parse_events(&text).with_context(|| format!("bad event log {}", path.display()))?;
    log::info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

pub fn load_config(path: &Path) -> Result<SwarmConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SwarmConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}
