//! Configuration for DrishtiIO nodes
//!
//! Loads configuration from a TOML file shared by the sensor daemon and
//! the viewer. Hardware pin assignments and link credentials are carried
//! for the out-of-crate bring-up layer; the loops themselves consume the
//! network, sender, servo and viewer sections.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub network: NetworkConfig,
    pub sender: SenderConfig,
    pub servo: ServoConfig,
    pub viewer: ViewerConfig,
    pub logging: LoggingConfig,
}

/// Ranging sensor wiring and timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    /// I2C data pin
    pub sda_pin: u8,
    /// I2C clock pin
    pub scl_pin: u8,
    /// I2C bus frequency in Hz
    pub i2c_freq_hz: u32,
    /// Ranging frequency in Hz (cycles per second)
    pub ranging_freq_hz: u8,
}

/// Network link and addressing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Wi-Fi SSID for station-mode bring-up
    pub ssid: String,
    /// Wi-Fi passphrase
    pub password: String,
    /// Telemetry destination, broadcast or unicast
    ///
    /// Examples: `192.168.100.255` (subnet broadcast), `192.168.100.17`
    pub broadcast_addr: String,
    /// Telemetry destination port
    pub telemetry_port: u16,
    /// Command responder listen port
    pub command_port: u16,
}

/// Broadcast sender pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderConfig {
    /// Sleep between sender iterations in milliseconds
    ///
    /// The only suspension point of the sender loop; bounds CPU use.
    pub cadence_ms: u64,
}

/// Servo wiring and duty calibration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServoConfig {
    /// PWM output pin
    pub pin: u8,
    /// Duty value at 0 degrees
    pub duty_min: u16,
    /// Duty value at 180 degrees
    pub duty_max: u16,
}

/// Observer smoothing and display
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Local bind address for the telemetry socket
    pub bind_addr: String,
    /// Exponential smoothing factor in (0, 1]; lower is smoother
    pub alpha: f32,
    /// Distances at or below this render as hot (millimeters)
    pub near_mm: f32,
    /// Distances at or beyond this render as cold; also the sentinel
    /// the display is seeded with (millimeters)
    pub far_mm: f32,
    /// Render tick interval in milliseconds
    pub render_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default station-mode configuration
    ///
    /// Matches the reference deployment: VL53L5CX on pins 2/3 at 400 kHz,
    /// 20 Hz ranging, subnet broadcast on port 5005, alpha 0.3 display
    /// over the 100-2000 mm band.
    pub fn station_defaults() -> Self {
        Self {
            sensor: SensorConfig {
                sda_pin: 3,
                scl_pin: 2,
                i2c_freq_hz: 400_000,
                ranging_freq_hz: 20,
            },
            network: NetworkConfig {
                ssid: "drishti-net".to_string(),
                password: "change-me".to_string(),
                broadcast_addr: "192.168.100.255".to_string(),
                telemetry_port: 5005,
                command_port: 5005,
            },
            sender: SenderConfig { cadence_ms: 10 },
            servo: ServoConfig {
                pin: 3,
                duty_min: 26,
                duty_max: 128,
            },
            viewer: ViewerConfig {
                bind_addr: "0.0.0.0".to_string(),
                alpha: 0.3,
                near_mm: 100.0,
                far_mm: 2000.0,
                render_interval_ms: 15,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Reject configurations the loops cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.viewer.alpha > 0.0 && self.viewer.alpha <= 1.0) {
            return Err(Error::Config(format!(
                "viewer.alpha must be in (0, 1], got {}",
                self.viewer.alpha
            )));
        }
        if self.viewer.far_mm <= self.viewer.near_mm {
            return Err(Error::Config(format!(
                "viewer.far_mm ({}) must exceed viewer.near_mm ({})",
                self.viewer.far_mm, self.viewer.near_mm
            )));
        }
        if self.sensor.ranging_freq_hz == 0 {
            return Err(Error::Config(
                "sensor.ranging_freq_hz must be at least 1".to_string(),
            ));
        }
        if self.servo.duty_max <= self.servo.duty_min {
            return Err(Error::Config(format!(
                "servo.duty_max ({}) must exceed servo.duty_min ({})",
                self.servo.duty_max, self.servo.duty_min
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::station_defaults()
    }
}

/// Resolve the config file path from command line arguments
///
/// Supports `--config <path>`, `-c <path>`, or a first positional
/// argument; falls back to `default_path`.
pub fn config_path_from_args(default_path: &str) -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    default_path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_defaults() {
        let config = AppConfig::station_defaults();
        assert_eq!(config.sensor.ranging_freq_hz, 20);
        assert_eq!(config.network.telemetry_port, 5005);
        assert_eq!(config.sender.cadence_ms, 10);
        assert_eq!(config.servo.duty_min, 26);
        assert_eq!(config.servo.duty_max, 128);
        assert_eq!(config.viewer.alpha, 0.3);
        assert_eq!(config.viewer.far_mm, 2000.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::station_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[sensor]"));
        assert!(toml_string.contains("[network]"));
        assert!(toml_string.contains("[viewer]"));
        assert!(toml_string.contains("ranging_freq_hz = 20"));

        let parsed: AppConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.network.broadcast_addr, config.network.broadcast_addr);
        assert_eq!(parsed.viewer.alpha, config.viewer.alpha);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[sensor]
sda_pin = 3
scl_pin = 2
i2c_freq_hz = 400000
ranging_freq_hz = 15

[network]
ssid = "lab"
password = "secret"
broadcast_addr = "192.168.4.255"
telemetry_port = 5005
command_port = 5005

[sender]
cadence_ms = 50

[servo]
pin = 3
duty_min = 26
duty_max = 128

[viewer]
bind_addr = "0.0.0.0"
alpha = 0.5
near_mm = 100.0
far_mm = 2500.0
render_interval_ms = 15

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.sensor.ranging_freq_hz, 15);
        assert_eq!(config.network.broadcast_addr, "192.168.4.255");
        assert_eq!(config.sender.cadence_ms, 50);
        assert_eq!(config.viewer.alpha, 0.5);
        assert_eq!(config.logging.level, "debug");
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let mut config = AppConfig::station_defaults();
        config.viewer.alpha = 0.0;
        assert!(config.validate().is_err());
        config.viewer.alpha = 1.5;
        assert!(config.validate().is_err());
        config.viewer.alpha = 1.0;
        config.validate().unwrap();
    }

    #[test]
    fn test_inverted_display_range_rejected() {
        let mut config = AppConfig::station_defaults();
        config.viewer.far_mm = 50.0;
        assert!(config.validate().is_err());
    }
}
