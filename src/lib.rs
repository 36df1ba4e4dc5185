//! DrishtiIO - depth telemetry for an 8x8 time-of-flight sensor node
//!
//! ## Protocol Architecture
//!
//! - **Telemetry (UDP, port 5005)**: the sensor node broadcasts one
//!   128-byte depth frame (64 little-endian u16 millimeter cells) per
//!   completed ranging cycle, fire-and-forget. Observers drain the
//!   socket each render tick and keep the latest frame.
//! - **Commands (UDP)**: ASCII integer angle in, JSON reply out
//!   (`{"number": 90, "factors": [2,3,3,5]}`), driving the servo.
//!
//! Delivery is best-effort by design: no retries, no sequencing, no
//! acknowledgements. The latest frame always wins.

pub mod codec;
pub mod command;
pub mod config;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod smoothing;
pub mod streaming;
pub mod types;
pub mod viewer;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
