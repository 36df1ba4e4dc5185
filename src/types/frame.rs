//! Depth frame type

/// Grid side length of the ranging sensor (8x8 zones)
pub const GRID_DIM: usize = 8;

/// Total number of ranging zones per frame
pub const ZONE_COUNT: usize = GRID_DIM * GRID_DIM;

/// One complete depth frame from a single ranging cycle
///
/// Row-major 8x8 grid of distance samples in millimeters. Only valid once
/// the sensor has signaled ranging-cycle completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFrame {
    /// Distance samples in millimeters, row-major
    pub cells: [u16; ZONE_COUNT],
}

impl DepthFrame {
    /// Create a frame from a full cell array
    pub const fn from_cells(cells: [u16; ZONE_COUNT]) -> Self {
        Self { cells }
    }

    /// Create an all-zero frame
    pub const fn zeroed() -> Self {
        Self {
            cells: [0; ZONE_COUNT],
        }
    }

    /// Get the sample at (row, col)
    pub fn cell(&self, row: usize, col: usize) -> u16 {
        self.cells[row * GRID_DIM + col]
    }
}

impl Default for DepthFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}
