//! Priority queue with drop-tail capacity.
//!
//! Packets carrying acknowledgements, reliable delivery or emergency traffic
//! leave the queue first. Equal scores are served in arrival order, so a
//! steady stream of higher-score traffic can still delay lower scores, but
//! never reorders packets within one score.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::net::{Packet, PacketPool};
use crate::time::MonoTime;

use super::entry::{Dequeued, QueueCore, QueueEntry};
use super::{PacketQueue, QueueStatistics};

#[derive(Debug)]
struct Ranked(QueueEntry);

impl Ranked {
    fn key(&self) -> (u8, Reverse<u64>) {
        (self.0.priority, Reverse(self.0.seq))
    }
}

// BinaryHeap is a max-heap: highest score first, then lowest seq.
impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ranked {}

#[derive(Debug)]
pub struct PriorityQueue {
    core: QueueCore,
    heap: BinaryHeap<Ranked>,
}

impl PriorityQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            core: QueueCore::new(capacity),
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Score of the packet that would be dequeued next.
    pub fn peek_priority(&self) -> Option<u8> {
        self.heap.peek().map(|r| r.0.priority)
    }
}

impl PacketQueue for PriorityQueue {
    fn enqueue(&mut self, pkt: Packet, now: MonoTime) -> Result<(), Packet> {
        let entry = self.core.admit(pkt, now, self.heap.len())?;
        self.heap.push(Ranked(entry));
        Ok(())
    }

    fn dequeue(&mut self, now: MonoTime) -> Option<Dequeued> {
        let Ranked(entry) = self.heap.pop()?;
        Some(self.core.release_entry(entry, now))
    }

    // Age is unrelated to heap order, so every entry has to be looked at and
    // the survivors re-heaped.
    fn evict_expired(&mut self, now: MonoTime, max_age_ms: u64, pool: &mut dyn PacketPool) -> usize {
        let entries = std::mem::take(&mut self.heap).into_vec();
        let before = entries.len();
        let mut kept = Vec::with_capacity(before);
        for Ranked(entry) in entries {
            if entry.is_expired(now, max_age_ms) {
                pool.release(entry.packet);
            } else {
                kept.push(Ranked(entry));
            }
        }
        self.heap = BinaryHeap::from(kept);
        let evicted = before - self.heap.len();
        self.core.stats.record_expired(evicted as u64);
        evicted
    }

    fn clear(&mut self, pool: &mut dyn PacketPool) -> usize {
        let n = self.heap.len();
        for Ranked(entry) in self.heap.drain() {
            pool.release(entry.packet);
        }
        n
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.core.capacity = capacity;
    }

    fn stats(&self) -> &QueueStatistics {
        &self.core.stats
    }

    fn stats_mut(&mut self) -> &mut QueueStatistics {
        &mut self.core.stats
    }
}
