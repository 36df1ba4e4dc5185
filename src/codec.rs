//! Wire format for depth frames
//!
//! # Telemetry wire protocol
//!
//! Each UDP datagram carries exactly one depth frame:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ 64 cells x little-endian u16 = 128 bytes   │
//! └────────────────────────────────────────────┘
//! ```
//!
//! - **No header**: no length prefix, no sequence number, no checksum
//! - **Fixed length**: both ends know the frame size; any other length
//!   is rejected by [`decode`]
//! - **Byte order**: little-endian per cell, row-major cell order
//!
//! The transport checksum (UDP) is the only integrity check. A dropped or
//! reordered datagram just means the observer briefly shows a stale frame;
//! the next frame supersedes it.

use crate::error::{Error, Result};
use crate::types::{DepthFrame, ZONE_COUNT};

/// Exact on-wire size of one encoded depth frame in bytes
pub const WIRE_FRAME_LEN: usize = ZONE_COUNT * 2;

/// Encode a frame into a caller-owned buffer
///
/// The buffer is reused across sender iterations so the hot path does not
/// allocate.
pub fn encode_into(frame: &DepthFrame, buf: &mut [u8; WIRE_FRAME_LEN]) {
    for (i, cell) in frame.cells.iter().enumerate() {
        buf[i * 2..i * 2 + 2].copy_from_slice(&cell.to_le_bytes());
    }
}

/// Encode a frame into a fresh buffer
pub fn encode(frame: &DepthFrame) -> [u8; WIRE_FRAME_LEN] {
    let mut buf = [0u8; WIRE_FRAME_LEN];
    encode_into(frame, &mut buf);
    buf
}

/// Decode a received datagram payload into a frame
///
/// Exact inverse of [`encode`]. Fails with [`Error::FrameFormat`] unless
/// the payload is exactly [`WIRE_FRAME_LEN`] bytes.
pub fn decode(bytes: &[u8]) -> Result<DepthFrame> {
    if bytes.len() != WIRE_FRAME_LEN {
        return Err(Error::FrameFormat {
            expected: WIRE_FRAME_LEN,
            actual: bytes.len(),
        });
    }

    let mut cells = [0u16; ZONE_COUNT];
    for (i, chunk) in bytes.chunks_exact(2).enumerate() {
        cells[i] = u16::from_le_bytes([chunk[0], chunk[1]]);
    }
    Ok(DepthFrame::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_frame() -> DepthFrame {
        let mut cells = [0u16; ZONE_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u16;
        }
        DepthFrame::from_cells(cells)
    }

    #[test]
    fn test_round_trip() {
        let frame = ramp_frame();
        let decoded = decode(&encode(&frame)).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_cells_are_little_endian() {
        let mut cells = [0u16; ZONE_COUNT];
        cells[0] = 0x1234;
        cells[1] = 0x00FF;
        let bytes = encode(&DepthFrame::from_cells(cells));
        assert_eq!(&bytes[0..4], &[0x34, 0x12, 0xFF, 0x00]);
    }

    #[test]
    fn test_wrong_length_rejected() {
        for len in [0, 1, WIRE_FRAME_LEN - 1, WIRE_FRAME_LEN + 1, 4096] {
            let bytes = vec![0u8; len];
            match decode(&bytes) {
                Err(Error::FrameFormat { expected, actual }) => {
                    assert_eq!(expected, WIRE_FRAME_LEN);
                    assert_eq!(actual, len);
                }
                other => panic!("expected FrameFormat error for len {}, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_max_distance_survives() {
        let frame = DepthFrame::from_cells([u16::MAX; ZONE_COUNT]);
        assert_eq!(decode(&encode(&frame)).unwrap(), frame);
    }
}
