//! DrishtiIO sensor daemon
//!
//! Runs the two sensor-node loops on dedicated threads:
//!
//! - Broadcast sender: poll the ranging sensor, encode ready frames,
//!   broadcast them at the configured cadence.
//! - Command responder: serve servo angle commands with factorization
//!   replies.
//!
//! The physical VL53L5CX and PWM drivers are external; this binary runs
//! the simulated devices so the whole pipeline works hardware-free.

use drishti_io::command::CommandResponder;
use drishti_io::config::{self, AppConfig};
use drishti_io::devices::mock::{MockServo, SimSensor};
use drishti_io::error::{Error, Result};
use drishti_io::streaming::BroadcastSender;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

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

    log::info!("DrishtiIO sensor daemon starting");

    let config = load_config()?;
    log::info!(
        "Sensor: pins sda={}/scl={}, {} Hz ranging",
        config.sensor.sda_pin,
        config.sensor.scl_pin,
        config.sensor.ranging_freq_hz
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    // Telemetry loop
    let target: SocketAddr = format!(
        "{}:{}",
        config.network.broadcast_addr, config.network.telemetry_port
    )
    .parse()
    .map_err(|e| Error::Config(format!("broadcast target: {}", e)))?;

    let sensor = SimSensor::new(config.sensor.ranging_freq_hz);
    log::info!("Using simulated ranging sensor");

    let mut sender = BroadcastSender::new(
        target,
        Duration::from_millis(config.sender.cadence_ms),
        Box::new(sensor),
        Arc::clone(&running),
    )?;
    let sender_thread = thread::spawn(move || sender.run());

    // Command loop
    let cmd_addr = format!("0.0.0.0:{}", config.network.command_port);
    let mut responder = CommandResponder::bind(
        &cmd_addr,
        config.servo.clone(),
        Box::new(MockServo::new()),
        Arc::clone(&running),
    )?;
    let responder_thread = thread::spawn(move || responder.run());

    if sender_thread.join().is_err() {
        log::error!("broadcast sender thread panicked");
    }
    if responder_thread.join().is_err() {
        log::error!("command responder thread panicked");
    }

    log::info!("DrishtiIO sensor daemon stopped");
    Ok(())
}
