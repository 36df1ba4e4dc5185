//! Simulated ranging sensor
//!
//! Synthesizes a plausible 8x8 depth scene (a near object drifting across
//! a far background) at the configured ranging frequency, so the daemon
//! and viewer run end-to-end without a physical sensor attached.

use crate::drivers::RangingSensor;
use crate::error::Result;
use crate::types::{DepthFrame, GRID_DIM, ZONE_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Background distance in millimeters (open space)
const BACKGROUND_MM: f32 = 2000.0;

/// Closest distance of the simulated object in millimeters
const OBJECT_MM: f32 = 300.0;

/// Per-cell measurement jitter amplitude in millimeters
const JITTER_MM: f32 = 15.0;

/// Simulated ranging sensor producing frames at a fixed frequency
pub struct SimSensor {
    interval: Duration,
    last_cycle: Option<Instant>,
    rng: StdRng,
    // Object position and velocity in grid coordinates
    pos: (f32, f32),
    vel: (f32, f32),
}

impl SimSensor {
    /// Create a simulator ranging at `freq_hz` cycles per second
    pub fn new(freq_hz: u8) -> Self {
        let freq = u64::from(freq_hz.max(1));
        Self {
            interval: Duration::from_millis(1000 / freq),
            last_cycle: None,
            rng: StdRng::from_entropy(),
            pos: (2.0, 3.5),
            vel: (0.35, 0.2),
        }
    }

    fn advance_object(&mut self) {
        let max = (GRID_DIM - 1) as f32;
        self.pos.0 += self.vel.0;
        self.pos.1 += self.vel.1;
        if self.pos.0 < 0.0 || self.pos.0 > max {
            self.vel.0 = -self.vel.0;
            self.pos.0 = self.pos.0.clamp(0.0, max);
        }
        if self.pos.1 < 0.0 || self.pos.1 > max {
            self.vel.1 = -self.vel.1;
            self.pos.1 = self.pos.1.clamp(0.0, max);
        }
    }
}

impl RangingSensor for SimSensor {
    fn poll_ready(&mut self) -> bool {
        self.last_cycle
            .map_or(true, |t| t.elapsed() >= self.interval)
    }

    fn fetch_frame(&mut self) -> Result<DepthFrame> {
        self.last_cycle = Some(Instant::now());
        self.advance_object();

        let mut cells = [0u16; ZONE_COUNT];
        for row in 0..GRID_DIM {
            for col in 0..GRID_DIM {
                let dx = col as f32 - self.pos.0;
                let dy = row as f32 - self.pos.1;
                let d2 = dx * dx + dy * dy;
                // Inside the object footprint, distance rises with the
                // offset from its center; outside it is open background.
                let base = if d2 < 4.0 {
                    OBJECT_MM + d2 * 150.0
                } else {
                    BACKGROUND_MM
                };
                let jitter = self.rng.gen_range(-JITTER_MM..JITTER_MM);
                cells[row * GRID_DIM + col] = (base + jitter).clamp(0.0, 4000.0) as u16;
            }
        }
        Ok(DepthFrame::from_cells(cells))
    }
}
