//! Standalone playback of a scripted terminal scenario.

use crate::render;
use anyhow::{Context, Result};
use archgo_application::LogPlaybackScheduler;
use archgo_core::playback::Scenario;
use std::path::Path;

pub async fn run(scenario: Scenario, source: Option<&Path>) -> Result<()> {
    let source = match source {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => String::new(),
    };

    let mut scheduler = LogPlaybackScheduler::new();
    let mut run = scheduler.start(scenario, &source);
    while let Some(event) = run.next().await {
        render::print_log_event(&event);
    }
    Ok(())
}
