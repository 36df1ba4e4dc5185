//! Servo command/response channel
//!
//! Independent of the telemetry stream: same transport class (UDP), own
//! grammar (ASCII integer in, JSON record out) and own cadence.

pub mod primes;
pub mod responder;
pub mod servo;

pub use primes::factorize;
pub use responder::CommandResponder;
pub use servo::angle_to_duty;
