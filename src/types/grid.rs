//! Smoothed display grid

use crate::types::{GRID_DIM, ZONE_COUNT};

/// Floating-point grid holding the observer's smoothed distance estimates
///
/// Same shape and order as [`DepthFrame`](crate::types::DepthFrame). Owned
/// exclusively by the observer process and mutated once per accepted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothGrid {
    /// Smoothed distance estimates in millimeters, row-major
    pub cells: [f32; ZONE_COUNT],
}

impl SmoothGrid {
    /// Create a grid with every cell set to `value`
    ///
    /// Used to seed the display with the far bound so it starts empty
    /// instead of reading zero (touching) everywhere.
    pub const fn filled(value: f32) -> Self {
        Self {
            cells: [value; ZONE_COUNT],
        }
    }

    /// Get the estimate at (row, col)
    pub fn cell(&self, row: usize, col: usize) -> f32 {
        self.cells[row * GRID_DIM + col]
    }
}
