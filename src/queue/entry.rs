//! Queue entries and the bookkeeping shared by both strategies.

use tracing::trace;

use crate::net::Packet;
use crate::time::MonoTime;

use super::stats::QueueStatistics;

/// A held packet. Built once on enqueue and never modified.
#[derive(Debug)]
pub struct QueueEntry {
    pub packet: Packet,
    pub enqueued_at: MonoTime,
    pub priority: u8,
    /// Arrival order within this queue.
    pub seq: u64,
}

impl QueueEntry {
    pub fn age_ms(&self, now: MonoTime) -> u64 {
        now.millis_since(self.enqueued_at)
    }

    pub fn is_expired(&self, now: MonoTime, max_age_ms: u64) -> bool {
        self.age_ms(now) >= max_age_ms
    }
}

/// Result of a dequeue: the packet plus what the scheduler needs for stats.
#[derive(Debug)]
pub struct Dequeued {
    pub packet: Packet,
    pub priority: u8,
    pub waited_ms: u64,
}

#[derive(Debug)]
pub(super) struct QueueCore {
    pub(super) capacity: usize,
    next_seq: u64,
    pub(super) stats: QueueStatistics,
}

impl QueueCore {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next_seq: 0,
            stats: QueueStatistics::default(),
        }
    }

    /// Turns `pkt` into an entry if there is room for it.
    pub(super) fn admit(&mut self, pkt: Packet, now: MonoTime, len: usize) -> Result<QueueEntry, Packet> {
        if len >= self.capacity {
            self.stats.record_overflow();
            trace!(pkt_id = %pkt.id, len, capacity = self.capacity, "queue full");
            return Err(pkt);
        }
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.stats.record_enqueue();
        Ok(QueueEntry {
            priority: pkt.priority_score(),
            packet: pkt,
            enqueued_at: now,
            seq,
        })
    }

    pub(super) fn release_entry(&mut self, entry: QueueEntry, now: MonoTime) -> Dequeued {
        let waited_ms = entry.age_ms(now);
        self.stats.record_wait(waited_ms);
        Dequeued {
            packet: entry.packet,
            priority: entry.priority,
            waited_ms,
        }
    }
}
