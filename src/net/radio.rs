//! Radio transmit boundary.

use std::fmt;

use thiserror::Error;

use super::packet::Packet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxErrorKind {
    /// Radio busy or unavailable right now; the packet is fine.
    Transient,
    /// The radio refused this packet and will keep refusing it.
    InvalidPacket,
}

impl fmt::Display for TxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxErrorKind::Transient => f.write_str("radio temporarily unavailable"),
            TxErrorKind::InvalidPacket => f.write_str("packet rejected by radio"),
        }
    }
}

/// A failed transmit. Ownership of the packet comes back with the error.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct TxFailure {
    pub kind: TxErrorKind,
    pub packet: Packet,
}

impl TxFailure {
    pub fn transient(packet: Packet) -> Self {
        Self {
            kind: TxErrorKind::Transient,
            packet,
        }
    }

    pub fn invalid(packet: Packet) -> Self {
        Self {
            kind: TxErrorKind::InvalidPacket,
            packet,
        }
    }
}

/// Transmit primitive. Must return promptly; queueing for airtime is the
/// driver's business.
pub trait Radio {
    fn transmit(&mut self, pkt: Packet) -> Result<(), TxFailure>;
}
