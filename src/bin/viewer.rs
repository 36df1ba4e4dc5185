//! DrishtiIO viewer
//!
//! Observer node: binds the telemetry port, drains it each render tick,
//! smooths accepted frames and draws a terminal heatmap.

use drishti_io::config::{self, AppConfig};
use drishti_io::error::{Error, Result};
use drishti_io::viewer::{HeatmapRenderer, Viewer};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn load_config() -> Result<AppConfig> {
    let path = config::config_path_from_args("drishti.toml");
    if Path::new(&path).exists() {
        log::info!("Using config: {}", path);
        AppConfig::from_file(&path)
    } else {
        log::info!("Config {} not found, using station defaults", path);
        Ok(AppConfig::station_defaults())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("DrishtiIO viewer starting");

    let config = load_config()?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let bind_addr = format!(
        "{}:{}",
        config.viewer.bind_addr, config.network.telemetry_port
    );
    let renderer = HeatmapRenderer::new(config.viewer.near_mm, config.viewer.far_mm);
    let mut viewer = Viewer::bind(&bind_addr, &config.viewer, renderer, running)?;

    viewer.run()
}
