//! Mock ranging sensor for testing

use crate::drivers::RangingSensor;
use crate::error::{Error, Result};
use crate::types::DepthFrame;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock ranging sensor with injectable frames and faults
///
/// Clones share state, so a test can keep a handle for injection while the
/// sender owns the boxed driver.
#[derive(Clone, Default)]
pub struct MockSensor {
    state: Arc<Mutex<MockSensorState>>,
}

#[derive(Debug, Default)]
struct MockSensorState {
    frames: VecDeque<DepthFrame>,
    fault: bool,
}

impl MockSensor {
    /// Create a new mock sensor with no pending frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame as the next completed ranging cycle
    pub fn inject_frame(&self, frame: DepthFrame) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.frames.push_back(frame);
    }

    /// Make the next fetch report a transducer fault
    pub fn inject_fault(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.fault = true;
    }
}

impl RangingSensor for MockSensor {
    fn poll_ready(&mut self) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.fault || !state.frames.is_empty()
    }

    fn fetch_frame(&mut self) -> Result<DepthFrame> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.fault {
            state.fault = false;
            return Err(Error::Hardware("transducer fault".to_string()));
        }
        state
            .frames
            .pop_front()
            .ok_or_else(|| Error::Hardware("ranging data not ready".to_string()))
    }
}
