//! Build page contexts from the content directory

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::{GenerateSummary, Generator};
use crate::Horizon;

/// Load and save every record, then write all pages
pub fn run(horizon: &Horizon) -> Result<()> {
    build(horizon).map(|_| ())
}

pub fn build(horizon: &Horizon) -> Result<GenerateSummary> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(horizon);
    let store = loader.load_store()?;

    tracing::info!(
        "Loaded {} content records and {} authors",
        store.contents().len(),
        store.authors().count()
    );

    let summary = Generator::new(horizon, loader.converter()).generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(summary)
}

/// Watch for file changes and rebuild
pub async fn watch(horizon: &Horizon) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch content directory
    watcher.watch(horizon.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    // Watch config file
    let config_path = horizon.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    if let Err(e) = rebuild(horizon) {
                        tracing::error!("Build failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Reload the config before building, so config edits take effect
fn rebuild(horizon: &Horizon) -> Result<()> {
    let horizon = Horizon::new(&horizon.base_dir)?;
    run(&horizon)
}
