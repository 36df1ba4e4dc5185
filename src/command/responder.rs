//! UDP command responder
//!
//! # Command protocol
//!
//! - Request: ASCII decimal integer, e.g. `"90"`, expected in 0..=180
//! - Response: JSON record `{"number": 90, "factors": [2, 3, 3, 5]}`
//!   sent back to the request's source address
//!
//! An in-range command moves the servo and gets a reply. An out-of-range
//! integer leaves the servo untouched but still gets its factorization
//! reply, matching the deployed protocol. Values beyond the
//! factorization bound echo back with an empty factor list, since one
//! datagram must never cost seconds of trial division. Non-numeric input
//! gets no reply at all; absence of a reply is the only failure signal
//! this protocol has, a known gap kept for compatibility.

use crate::command::primes::factorize;
use crate::command::servo::angle_to_duty;
use crate::config::ServoConfig;
use crate::drivers::Actuator;
use crate::error::{Error, Result};
use serde::Serialize;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Idle delay between receive polls
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Largest magnitude eligible for a factorization reply
///
/// Trial division up to sqrt of this bound finishes in about a
/// millisecond; anything bigger gets `"factors": []` so a hostile or
/// garbled datagram cannot stall the responder loop.
const FACTOR_BOUND: i64 = 1_000_000_000_000;

/// Reply record for a numeric command
#[derive(Debug, Serialize)]
struct FactorReply {
    number: i64,
    factors: Vec<i64>,
}

/// Handle one decoded command message
///
/// Returns the JSON reply to send, or `None` when the message earns no
/// reply (non-numeric input).
fn handle_command(actuator: &mut dyn Actuator, servo: &ServoConfig, msg: &str) -> Option<String> {
    let Ok(n) = msg.trim().parse::<i64>() else {
        log::warn!("ignoring non-numeric command: {:?}", msg);
        return None;
    };

    if (0..=180).contains(&n) {
        let duty = angle_to_duty(n as u8, servo.duty_min, servo.duty_max);
        match actuator.set_duty(duty) {
            Ok(()) => log::info!("servo angle {} (duty {})", n, duty),
            Err(e) => log::error!("servo rejected duty {}: {}", duty, e),
        }
    } else {
        log::warn!("angle {} outside 0..=180, servo not moved", n);
    }

    let factors = if (-FACTOR_BOUND..=FACTOR_BOUND).contains(&n) {
        factorize(n)
    } else {
        log::warn!("value {} beyond factorization bound, replying without factors", n);
        Vec::new()
    };
    let reply = FactorReply { number: n, factors };
    match serde_json::to_string(&reply) {
        Ok(json) => Some(json),
        Err(e) => {
            log::error!("reply serialization failed: {}", e);
            None
        }
    }
}

/// Stateless request/response loop driving the servo actuator
pub struct CommandResponder {
    socket: UdpSocket,
    servo: ServoConfig,
    actuator: Box<dyn Actuator>,
    running: Arc<AtomicBool>,
}

impl CommandResponder {
    /// Bind the command socket (non-blocking) on `bind_addr`
    pub fn bind(
        bind_addr: &str,
        servo: ServoConfig,
        actuator: Box<dyn Actuator>,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(bind_addr)
            .map_err(|e| Error::LinkUnavailable(format!("command socket bind {}: {}", bind_addr, e)))?;
        socket.set_nonblocking(true)?;

        Ok(Self {
            socket,
            servo,
            actuator,
            running,
        })
    }

    /// Local address of the bound command socket
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Run the responder loop until the shutdown flag clears
    pub fn run(&mut self) {
        match self.local_addr() {
            Ok(addr) => log::info!("command responder listening on {}", addr),
            Err(e) => log::warn!("command responder address unknown: {}", e),
        }

        let mut buf = [0u8; 64];
        while self.running.load(Ordering::Relaxed) {
            match self.socket.recv_from(&mut buf) {
                Ok((len, peer)) => {
                    let msg = String::from_utf8_lossy(&buf[..len]);
                    if let Some(reply) =
                        handle_command(self.actuator.as_mut(), &self.servo, &msg)
                    {
                        if let Err(e) = self.socket.send_to(reply.as_bytes(), peer) {
                            // Same freshness rule as telemetry: drop, don't retry
                            log::debug!("dropped reply to {}: {}", peer, e);
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                Err(e) => log::error!("command socket error: {}", e),
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        log::info!("command responder stopped");
    }
}
