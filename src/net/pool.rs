//! Packet pool boundary
//!
//! Whoever owns packet storage implements [`PacketPool`]. Release takes the
//! packet by value, so a packet can be returned at most once.

use tracing::trace;

use super::id::PacketId;
use super::packet::Packet;

pub trait PacketPool {
    fn release(&mut self, pkt: Packet);
}

/// Fixed-size pool that tracks how many packets are out and which came back.
#[derive(Debug)]
pub struct BoundedPool {
    capacity: usize,
    outstanding: usize,
    next_id: u32,
    released: Vec<PacketId>,
}

impl BoundedPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            outstanding: 0,
            next_id: 1,
            released: Vec::new(),
        }
    }

    /// Hands out a zeroed packet with a fresh id, or `None` when exhausted.
    pub fn alloc_zeroed(&mut self) -> Option<Packet> {
        if self.outstanding >= self.capacity {
            return None;
        }
        let id = PacketId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.outstanding += 1;
        Some(Packet::zeroed(id))
    }

    /// Packets handed out and not yet released. A transmitted packet stays
    /// counted until the radio driver calls [`note_transmitted`](Self::note_transmitted);
    /// the scheduler never does.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Ids released so far, in release order.
    pub fn released(&self) -> &[PacketId] {
        &self.released
    }

    /// Accounts for a packet that left the node (transmitted) instead of coming back.
    pub fn note_transmitted(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}

impl PacketPool for BoundedPool {
    fn release(&mut self, pkt: Packet) {
        trace!(pkt_id = %pkt.id, "packet released to pool");
        self.outstanding = self.outstanding.saturating_sub(1);
        self.released.push(pkt.id);
    }
}
