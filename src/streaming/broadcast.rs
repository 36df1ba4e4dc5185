//! UDP broadcast sender for depth telemetry
//!
//! One cooperative loop: poll the sensor, encode a ready frame into a
//! reusable buffer, send it, sleep the configured cadence. The sleep is
//! the only suspension point, so a loop body always runs to completion
//! and a partially encoded frame can never be observed.
//!
//! # Stale-data policy
//!
//! On a not-ready cycle nothing is sent. Broadcast traffic stays
//! proportional to real sensor output and observers keep whatever frame
//! they last accepted.
//!
//! # Send failures
//!
//! Datagram telemetry favors freshness over delivery: a full transmit
//! queue or busy link drops the frame, logged at debug, never retried.
//! The next ranging cycle supersedes it anyway.

use crate::codec::{self, WIRE_FRAME_LEN};
use crate::drivers::RangingSensor;
use crate::error::{Error, Result};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Broadcast sender pairing a ranging sensor with a UDP socket
pub struct BroadcastSender {
    socket: UdpSocket,
    target: SocketAddr,
    cadence: Duration,
    sensor: Box<dyn RangingSensor>,
    buf: [u8; WIRE_FRAME_LEN],
    running: Arc<AtomicBool>,
}

impl BroadcastSender {
    /// Create a sender broadcasting to `target` every `cadence`
    ///
    /// Binds an ephemeral local port with `SO_BROADCAST` set and the
    /// socket in non-blocking mode.
    pub fn new(
        target: SocketAddr,
        cadence: Duration,
        sensor: Box<dyn RangingSensor>,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .map_err(|e| Error::LinkUnavailable(format!("telemetry socket bind: {}", e)))?;
        socket
            .set_broadcast(true)
            .map_err(|e| Error::LinkUnavailable(format!("SO_BROADCAST: {}", e)))?;
        socket.set_nonblocking(true)?;

        Ok(Self {
            socket,
            target,
            cadence,
            sensor,
            buf: [0; WIRE_FRAME_LEN],
            running,
        })
    }

    /// Run the sender loop until the shutdown flag clears
    pub fn run(&mut self) {
        log::info!(
            "broadcast sender started (target {}, cadence {:?})",
            self.target,
            self.cadence
        );

        while self.running.load(Ordering::Relaxed) {
            self.step();
            std::thread::sleep(self.cadence);
        }

        log::info!("broadcast sender stopped");
    }

    /// Execute one loop iteration without sleeping
    ///
    /// Returns true when a datagram went out. Kept separate from [`run`]
    /// so both the ready and not-ready branches are testable.
    pub fn step(&mut self) -> bool {
        if !self.sensor.poll_ready() {
            return false;
        }

        let frame = match self.sensor.fetch_frame() {
            Ok(frame) => frame,
            Err(e) => {
                // Non-fatal: keep the previous buffer, skip this cycle
                log::warn!("ranging cycle failed: {}", e);
                return false;
            }
        };

        codec::encode_into(&frame, &mut self.buf);

        match self.socket.send_to(&self.buf, self.target) {
            Ok(_) => {
                log::trace!("broadcast frame to {}", self.target);
                true
            }
            Err(e) => {
                // Transmit queue full / link busy: drop, next cycle wins
                log::debug!("dropped frame: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::MockSensor;
    use crate::types::{DepthFrame, ZONE_COUNT};
    use std::time::Instant;

    fn ramp_frame() -> DepthFrame {
        let mut cells = [0u16; ZONE_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u16;
        }
        DepthFrame::from_cells(cells)
    }

    fn loopback_receiver() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.set_nonblocking(true).unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    fn recv_with_deadline(socket: &UdpSocket) -> Option<Vec<u8>> {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut buf = [0u8; 2048];
        while Instant::now() < deadline {
            match socket.recv(&mut buf) {
                Ok(len) => return Some(buf[..len].to_vec()),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(5));
                }
                Err(e) => panic!("recv failed: {}", e),
            }
        }
        None
    }

    fn sender_to(target: SocketAddr, sensor: MockSensor) -> BroadcastSender {
        BroadcastSender::new(
            target,
            Duration::from_millis(10),
            Box::new(sensor),
            Arc::new(AtomicBool::new(true)),
        )
        .unwrap()
    }

    #[test]
    fn test_ready_cycle_sends_encoded_frame() {
        let (rx, addr) = loopback_receiver();
        let sensor = MockSensor::new();
        sensor.inject_frame(ramp_frame());

        let mut sender = sender_to(addr, sensor);
        assert!(sender.step());

        let payload = recv_with_deadline(&rx).expect("no datagram received");
        assert_eq!(payload, codec::encode(&ramp_frame()).to_vec());
    }

    #[test]
    fn test_not_ready_cycle_sends_nothing() {
        let (rx, addr) = loopback_receiver();
        let mut sender = sender_to(addr, MockSensor::new());

        assert!(!sender.step());

        std::thread::sleep(Duration::from_millis(20));
        let mut buf = [0u8; 256];
        assert_eq!(
            rx.recv(&mut buf).unwrap_err().kind(),
            std::io::ErrorKind::WouldBlock
        );
    }

    #[test]
    fn test_hardware_fault_skips_cycle_and_recovers() {
        let (rx, addr) = loopback_receiver();
        let sensor = MockSensor::new();
        sensor.inject_fault();
        sensor.inject_frame(ramp_frame());

        let mut sender = sender_to(addr, sensor);
        // Faulty cycle: nothing sent, loop survives
        assert!(!sender.step());
        // Next cycle delivers the queued frame
        assert!(sender.step());
        assert!(recv_with_deadline(&rx).is_some());
    }
}
