//! Error types
//!
//! Only configuration problems and direct transmit failures are errors. A full
//! queue is an expected, counted outcome and never shows up here.

use thiserror::Error;

use crate::net::{PacketId, TxErrorKind};

/// Rejected configuration input. The value being configured is left untouched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hour {0} out of range (0-23)")]
    HourOutOfRange(u8),

    #[error("minute {0} out of range (0-59)")]
    MinuteOutOfRange(u8),

    #[error("invalid time {0:?}, expected HH:MM (00:00-23:59)")]
    InvalidTime(String),

    #[error("queue size {0} out of range (1-{max})", max = crate::window::MAX_QUEUE_SIZE)]
    QueueSizeOutOfRange(u16),

    #[error("packet expiry must be positive")]
    ZeroExpiry,

    #[error("override duration must be positive")]
    ZeroDuration,

    #[error("unknown mode {0:?}, expected drop, queue or receive")]
    UnknownMode(String),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A packet admitted for immediate transmission could not be sent.
///
/// The packet has already been released to the pool when this is returned.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("transmit of packet {id} failed: {kind}")]
    Transmit { id: PacketId, kind: TxErrorKind },
}
