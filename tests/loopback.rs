//! End-to-end loopback tests
//!
//! Exercise the real sender, sockets, drain, smoother and command
//! responder over 127.0.0.1 with ephemeral ports.

use drishti_io::codec::{self, WIRE_FRAME_LEN};
use drishti_io::command::CommandResponder;
use drishti_io::config::{AppConfig, ServoConfig};
use drishti_io::devices::mock::{MockSensor, MockServo};
use drishti_io::smoothing::Smoother;
use drishti_io::streaming::{drain_latest, BroadcastSender};
use drishti_io::types::{DepthFrame, ZONE_COUNT};
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn ramp_frame() -> DepthFrame {
    let mut cells = [0u16; ZONE_COUNT];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = i as u16;
    }
    DepthFrame::from_cells(cells)
}

fn nonblocking_receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.set_nonblocking(true).unwrap();
    socket
}

/// Drain with a deadline so a slow loopback delivery cannot flake
fn drain_with_deadline(socket: &mut UdpSocket) -> Option<DepthFrame> {
    let mut scratch = [0u8; 2048];
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if let Some(frame) = drain_latest(socket, &mut scratch) {
            return Some(frame);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn test_sender_to_observer_frame_round_trip() {
    let mut rx = nonblocking_receiver();
    let target = rx.local_addr().unwrap();

    let sensor = MockSensor::new();
    sensor.inject_frame(ramp_frame());

    let mut sender = BroadcastSender::new(
        target,
        Duration::from_millis(10),
        Box::new(sensor),
        Arc::new(AtomicBool::new(true)),
    )
    .unwrap();

    assert!(sender.step());

    let frame = drain_with_deadline(&mut rx).expect("no frame received");
    assert_eq!(frame, ramp_frame());
}

#[test]
fn test_wire_frame_is_exactly_128_bytes() {
    let mut rx = nonblocking_receiver();
    let target = rx.local_addr().unwrap();

    let sensor = MockSensor::new();
    sensor.inject_frame(ramp_frame());
    let mut sender = BroadcastSender::new(
        target,
        Duration::from_millis(10),
        Box::new(sensor),
        Arc::new(AtomicBool::new(true)),
    )
    .unwrap();
    assert!(sender.step());

    let mut buf = [0u8; 2048];
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        match rx.recv(&mut buf) {
            Ok(len) => {
                assert_eq!(len, WIRE_FRAME_LEN);
                assert_eq!(buf[..len], codec::encode(&ramp_frame()));
                break;
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                assert!(Instant::now() < deadline, "no datagram received");
                thread::sleep(Duration::from_millis(5));
            }
            Err(e) => panic!("recv failed: {}", e),
        }
    }
}

/// First smoother update from the sentinel-seeded grid, as its own
/// scenario: the display starts at the far bound, not at the input.
#[test]
fn test_first_update_blends_sentinel_with_received_frame() {
    let mut rx = nonblocking_receiver();
    let target = rx.local_addr().unwrap();

    let sensor = MockSensor::new();
    sensor.inject_frame(ramp_frame());
    let mut sender = BroadcastSender::new(
        target,
        Duration::from_millis(10),
        Box::new(sensor),
        Arc::new(AtomicBool::new(true)),
    )
    .unwrap();
    assert!(sender.step());

    let frame = drain_with_deadline(&mut rx).expect("no frame received");

    let config = AppConfig::station_defaults().viewer;
    let mut smoother = Smoother::seeded(config.far_mm, config.alpha);
    smoother.update(&frame);

    for (i, cell) in smoother.grid().cells.iter().enumerate() {
        let expected = config.alpha * i as f32 + (1.0 - config.alpha) * config.far_mm;
        assert!(
            (cell - expected).abs() < 1e-3,
            "cell {}: got {}, expected {}",
            i,
            cell,
            expected
        );
    }
}

#[test]
fn test_last_datagram_wins_across_real_sockets() {
    let mut rx = nonblocking_receiver();
    let target = rx.local_addr().unwrap();
    let tx = UdpSocket::bind("127.0.0.1:0").unwrap();

    for value in [100u16, 200, 300] {
        let frame = DepthFrame::from_cells([value; ZONE_COUNT]);
        tx.send_to(&codec::encode(&frame), target).unwrap();
    }
    // Interleave junk that must be discarded without aborting the drain
    tx.send_to(&[0xFF; 17], target).unwrap();
    let last = DepthFrame::from_cells([400u16; ZONE_COUNT]);
    tx.send_to(&codec::encode(&last), target).unwrap();

    // Give loopback a moment to queue everything, then drain once
    thread::sleep(Duration::from_millis(100));
    let mut scratch = [0u8; 2048];
    let frame = drain_latest(&mut rx, &mut scratch).expect("no frame retained");
    assert_eq!(frame, last);
}

#[test]
fn test_command_round_trip_over_loopback() {
    let servo = MockServo::new();
    let running = Arc::new(AtomicBool::new(true));

    let mut responder = CommandResponder::bind(
        "127.0.0.1:0",
        ServoConfig {
            pin: 3,
            duty_min: 26,
            duty_max: 128,
        },
        Box::new(servo.clone()),
        Arc::clone(&running),
    )
    .unwrap();
    let responder_addr = responder.local_addr().unwrap();
    let responder_thread = thread::spawn(move || responder.run());

    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    client.send_to(b"90", responder_addr).unwrap();

    let mut buf = [0u8; 256];
    let (len, _) = client.recv_from(&mut buf).expect("no reply received");
    let reply: serde_json::Value = serde_json::from_slice(&buf[..len]).unwrap();

    assert_eq!(reply["number"], 90);
    assert_eq!(reply["factors"], serde_json::json!([2, 3, 3, 5]));
    assert_eq!(servo.last_duty(), Some(77));

    running.store(false, Ordering::Relaxed);
    responder_thread.join().unwrap();
}

#[test]
fn test_non_numeric_command_gets_no_reply() {
    let servo = MockServo::new();
    let running = Arc::new(AtomicBool::new(true));

    let mut responder = CommandResponder::bind(
        "127.0.0.1:0",
        ServoConfig {
            pin: 3,
            duty_min: 26,
            duty_max: 128,
        },
        Box::new(servo.clone()),
        Arc::clone(&running),
    )
    .unwrap();
    let responder_addr = responder.local_addr().unwrap();
    let responder_thread = thread::spawn(move || responder.run());

    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client
        .set_read_timeout(Some(Duration::from_millis(300)))
        .unwrap();
    client.send_to(b"not-a-number", responder_addr).unwrap();

    let mut buf = [0u8; 256];
    assert!(client.recv_from(&mut buf).is_err(), "expected silence");
    assert_eq!(servo.last_duty(), None);

    running.store(false, Ordering::Relaxed);
    responder_thread.join().unwrap();
}
