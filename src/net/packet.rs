//! Outbound mesh packet
//!
//! Only the attributes admission and prioritisation look at are modelled; the
//! payload bytes are opaque here.

use super::id::{NodeNum, PacketId};

/// Declared delivery tier set by the sending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacketPriority {
    #[default]
    Unset,
    Min,
    Background,
    Default,
    Reliable,
    Ack,
    Max,
}

/// Application port of a decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortNum {
    TextMessage,
    Position,
    NodeInfo,
    Routing,
    Telemetry,
    Emergency,
    Other(u16),
}

#[derive(Debug)]
pub enum Payload {
    Decoded { port: PortNum, data: Vec<u8> },
    Encrypted(Vec<u8>),
}

/// An outbound packet.
///
/// Not `Clone`: a packet is held by exactly one of the caller,
/// the queue, the radio or the pool, and handing it on moves it.
#[derive(Debug)]
pub struct Packet {
    pub id: PacketId,
    pub from: NodeNum,
    pub to: NodeNum,
    pub want_ack: bool,
    pub priority: PacketPriority,
    pub payload: Payload,
}

impl Packet {
    /// Zeroed packet as handed out by the pool; the caller fills it in.
    pub fn zeroed(id: PacketId) -> Self {
        Self {
            id,
            from: NodeNum(0),
            to: NodeNum::BROADCAST,
            want_ack: false,
            priority: PacketPriority::Unset,
            payload: Payload::Encrypted(Vec::new()),
        }
    }

    pub fn with_port(mut self, port: PortNum, data: Vec<u8>) -> Self {
        self.payload = Payload::Decoded { port, data };
        self
    }

    pub fn with_priority(mut self, priority: PacketPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_want_ack(mut self, want_ack: bool) -> Self {
        self.want_ack = want_ack;
        self
    }

    /// Port of the payload, if it has been decoded.
    pub fn port(&self) -> Option<PortNum> {
        match &self.payload {
            Payload::Decoded { port, .. } => Some(*port),
            Payload::Encrypted(_) => None,
        }
    }

    /// Queueing priority score; higher is served first.
    ///
    /// Computed from attributes that never change while the packet is queued,
    /// so it is evaluated once at enqueue time.
    pub fn priority_score(&self) -> u8 {
        let mut score = 1;
        if self.want_ack {
            score += 2;
        }
        match self.priority {
            PacketPriority::Reliable => score += 3,
            PacketPriority::Ack => score += 2,
            _ => {}
        }
        match self.port() {
            Some(PortNum::Position) => score += 1,
            Some(PortNum::Emergency) => score += 4,
            _ => {}
        }
        score
    }
}
