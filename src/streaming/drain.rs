//! Observer-side socket drain
//!
//! The observer is paced by its own render tick, not by packet arrival.
//! Each tick drains every pending datagram and keeps only the last frame
//! that decoded cleanly: last write wins, queue growth stays bounded, and
//! the freshest state is always the one displayed.

use crate::codec;
use crate::types::DepthFrame;
use std::io;
use std::net::UdpSocket;

/// Non-blocking datagram receive primitive
///
/// Must return `ErrorKind::WouldBlock` once no datagram is pending.
/// Implemented for [`UdpSocket`] (in non-blocking mode) and by
/// queue-backed fakes in tests.
pub trait DatagramSource {
    /// Receive one datagram into `buf`, returning its length
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl DatagramSource for UdpSocket {
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.recv(buf)
    }
}

/// Drain all pending datagrams, returning the latest decodable frame
///
/// Malformed or mis-sized datagrams are discarded without aborting the
/// pass; an earlier valid frame is still superseded by a later one.
/// Returns `None` when no valid frame arrived since the last pass.
pub fn drain_latest<S: DatagramSource + ?Sized>(
    source: &mut S,
    scratch: &mut [u8],
) -> Option<DepthFrame> {
    let mut latest = None;

    loop {
        match source.try_recv(scratch) {
            Ok(len) => match codec::decode(&scratch[..len]) {
                Ok(frame) => latest = Some(frame),
                Err(e) => log::trace!("discarding datagram: {}", e),
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
            Err(e) => {
                log::warn!("telemetry recv error: {}", e);
                break;
            }
        }
    }

    latest
}
