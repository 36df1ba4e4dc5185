//! Telemetry streaming: broadcast sender and observer-side drain

pub mod broadcast;
pub mod drain;

pub use broadcast::BroadcastSender;
pub use drain::{drain_latest, DatagramSource};
