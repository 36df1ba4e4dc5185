//! Observer loop: drain, smooth, render
//!
//! The loop is paced by its own render tick, independent of packet
//! arrival. Each tick drains the telemetry socket to the latest frame,
//! blends it into the smoothed grid, and hands the grid to the renderer.
//! Ticks with no new frame leave the display untouched, so packet loss
//! shows a stale image rather than a decaying one.

use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::smoothing::Smoother;
use crate::streaming::{drain_latest, DatagramSource};
use crate::types::{DepthFrame, SmoothGrid, GRID_DIM};
use std::io::{self, Write};
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Receive scratch buffer size; larger than a wire frame so oversized
/// junk datagrams are read whole and rejected by length
const SCRATCH_LEN: usize = 2048;

/// Renders the smoothed grid to some visual output
pub trait Render {
    /// Draw the current grid state
    fn render(&mut self, grid: &SmoothGrid) -> Result<()>;
}

/// Terminal heatmap renderer
///
/// Maps each cell onto a shade-character ramp over the configured
/// near/far band, near = dense, far = blank. Cells print doubled so the
/// 8x8 grid keeps a roughly square "pixel" look.
pub struct HeatmapRenderer {
    near_mm: f32,
    far_mm: f32,
}

/// Shade ramp from far (blank) to near (dense)
const SHADES: &[u8] = b" .:-=+*#%@";

impl HeatmapRenderer {
    /// Create a renderer displaying the `near_mm..far_mm` band
    pub fn new(near_mm: f32, far_mm: f32) -> Self {
        Self { near_mm, far_mm }
    }

    fn shade(&self, distance_mm: f32) -> char {
        let clipped = distance_mm.clamp(self.near_mm, self.far_mm);
        let t = (self.far_mm - clipped) / (self.far_mm - self.near_mm);
        let idx = (t * (SHADES.len() - 1) as f32).round() as usize;
        SHADES[idx.min(SHADES.len() - 1)] as char
    }
}

impl Render for HeatmapRenderer {
    fn render(&mut self, grid: &SmoothGrid) -> Result<()> {
        let mut out = String::with_capacity(GRID_DIM * (GRID_DIM * 2 + 1) + 8);
        out.push_str("\x1b[H");
        for row in 0..GRID_DIM {
            for col in 0..GRID_DIM {
                let ch = self.shade(grid.cell(row, col));
                out.push(ch);
                out.push(ch);
            }
            out.push('\n');
        }

        let mut stdout = io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Observer node: telemetry socket, smoother, renderer
pub struct Viewer<R: Render> {
    socket: UdpSocket,
    smoother: Smoother,
    renderer: R,
    tick: Duration,
    running: Arc<AtomicBool>,
    scratch: Vec<u8>,
}

impl<R: Render> Viewer<R> {
    /// Bind the telemetry socket and seed the display at the far bound
    pub fn bind(
        bind_addr: &str,
        config: &ViewerConfig,
        renderer: R,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(bind_addr)
            .map_err(|e| Error::LinkUnavailable(format!("viewer bind {}: {}", bind_addr, e)))?;
        socket.set_nonblocking(true)?;

        Ok(Self {
            socket,
            smoother: Smoother::seeded(config.far_mm, config.alpha),
            renderer,
            tick: Duration::from_millis(config.render_interval_ms),
            running,
            scratch: vec![0; SCRATCH_LEN],
        })
    }

    /// Apply one drain result: smooth and render only on a new frame
    ///
    /// Returns true when the display was updated.
    fn apply(&mut self, latest: Option<DepthFrame>) -> Result<bool> {
        match latest {
            Some(frame) => {
                self.smoother.update(&frame);
                self.renderer.render(self.smoother.grid())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run the observer loop until the shutdown flag clears
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "viewer listening on {} (render tick {:?})",
            self.socket.local_addr()?,
            self.tick
        );

        while self.running.load(Ordering::Relaxed) {
            let latest = drain_latest(&mut self.socket, &mut self.scratch);
            self.apply(latest)?;
            std::thread::sleep(self.tick);
        }

        log::info!("viewer stopped");
        Ok(())
    }

    /// Current smoothed grid (for inspection)
    pub fn grid(&self) -> &SmoothGrid {
        self.smoother.grid()
    }
}
