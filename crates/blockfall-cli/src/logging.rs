use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed `tracing` subscriber.
///
/// The terminal belongs to the TUI while a game runs, so logs are only
/// written when a log file is given. The filter comes from `filter`, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn init(log_file: Option<&Path>, filter: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let filter = build_filter(filter)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;
    Ok(())
}

fn build_filter(filter: Option<&str>) -> anyhow::Result<EnvFilter> {
    match filter {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log filter: {directive}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}
