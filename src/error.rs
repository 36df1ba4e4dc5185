//! Error types for DrishtiIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DrishtiIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sensor or actuator hardware fault
    ///
    /// Fatal during startup. Mid-loop the broadcast sender treats it as
    /// non-fatal: the faulty cycle is skipped and the loop keeps running.
    #[error("Hardware fault: {0}")]
    Hardware(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Datagram payload has the wrong length for a depth frame
    #[error("Invalid frame length: expected {expected} bytes, got {actual}")]
    FrameFormat {
        /// Required wire frame length in bytes
        expected: usize,
        /// Length of the rejected payload
        actual: usize,
    },

    /// Network bring-up failure (socket bind, broadcast option)
    #[error("Link unavailable: {0}")]
    LinkUnavailable(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
