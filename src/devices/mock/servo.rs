//! Mock servo actuator

use crate::drivers::Actuator;
use crate::error::Result;
use std::sync::{Arc, Mutex};

/// Mock servo recording the last applied duty value
///
/// Stands in for the PWM peripheral when running hardware-free; clones
/// share state so tests can observe what the responder applied.
#[derive(Clone, Default)]
pub struct MockServo {
    last_duty: Arc<Mutex<Option<u16>>>,
}

impl MockServo {
    /// Create a new mock servo that has not been driven yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty applied, if any
    pub fn last_duty(&self) -> Option<u16> {
        *self.last_duty.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Actuator for MockServo {
    fn set_duty(&mut self, duty: u16) -> Result<()> {
        let mut last = self.last_duty.lock().unwrap_or_else(|e| e.into_inner());
        *last = Some(duty);
        log::debug!("mock servo duty set to {}", duty);
        Ok(())
    }
}
