//! Hardware driver traits
//!
//! The physical register-level drivers (VL53L5CX I2C transactions, PWM
//! peripheral setup) live outside this crate; these traits are the seam
//! they plug into. Everything here is non-blocking by contract so loop
//! bodies can run to completion between sleeps.

use crate::error::Result;
use crate::types::DepthFrame;

/// Time-of-flight ranging sensor driver trait
pub trait RangingSensor: Send {
    /// Check whether a completed ranging cycle is waiting to be read
    ///
    /// Non-blocking; never stalls the calling loop.
    fn poll_ready(&mut self) -> bool;

    /// Fetch the frame from the completed ranging cycle
    ///
    /// Only valid after [`poll_ready`](Self::poll_ready) returned true;
    /// consumes the ready condition until the next cycle completes. A
    /// transducer fault surfaces as `Error::Hardware`, never as silent
    /// zeros.
    fn fetch_frame(&mut self) -> Result<DepthFrame>;
}

/// Servo actuator driver trait
pub trait Actuator: Send {
    /// Apply a raw PWM duty value to the servo
    fn set_duty(&mut self, duty: u16) -> Result<()>;
}
