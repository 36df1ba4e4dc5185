//! Mock and simulated devices for hardware-free operation and testing

mod sensor;
mod servo;
mod sim;

pub use sensor::MockSensor;
pub use servo::MockServo;
pub use sim::SimSensor;
