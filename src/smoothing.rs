//! Exponential smoothing of received depth frames

use crate::types::{DepthFrame, SmoothGrid};

/// Per-cell exponential low-pass filter over successive frames
///
/// Seeded with the far display bound so the screen starts empty rather
/// than reading zero, and only mutated when a new frame is accepted, so
/// packet loss never decays the display.
#[derive(Debug, Clone)]
pub struct Smoother {
    grid: SmoothGrid,
    alpha: f32,
}

impl Smoother {
    /// Create a smoother seeded at `far_mm` with blend factor `alpha`
    ///
    /// `alpha` must be in (0, 1]; lower is smoother but laggier. Fixed
    /// for the process lifetime.
    pub fn seeded(far_mm: f32, alpha: f32) -> Self {
        Self {
            grid: SmoothGrid::filled(far_mm),
            alpha,
        }
    }

    /// Blend a newly received frame into the smoothed state
    pub fn update(&mut self, frame: &DepthFrame) {
        for (state, new) in self.grid.cells.iter_mut().zip(frame.cells.iter()) {
            *state = self.alpha * f32::from(*new) + (1.0 - self.alpha) * *state;
        }
    }

    /// Current smoothed grid
    pub fn grid(&self) -> &SmoothGrid {
        &self.grid
    }
}
