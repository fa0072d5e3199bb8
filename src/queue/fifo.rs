//! Arrival-order queue with drop-tail capacity.
//!
//! The oldest packet always goes first, so nothing starves.

use std::collections::VecDeque;

use crate::net::{Packet, PacketPool};
use crate::time::MonoTime;

use super::entry::{Dequeued, QueueCore, QueueEntry};
use super::{PacketQueue, QueueStatistics};

#[derive(Debug)]
pub struct FifoQueue {
    core: QueueCore,
    q: VecDeque<QueueEntry>,
}

impl FifoQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            core: QueueCore::new(capacity),
            q: VecDeque::with_capacity(capacity),
        }
    }
}

impl PacketQueue for FifoQueue {
    fn enqueue(&mut self, pkt: Packet, now: MonoTime) -> Result<(), Packet> {
        let entry = self.core.admit(pkt, now, self.q.len())?;
        self.q.push_back(entry);
        Ok(())
    }

    fn dequeue(&mut self, now: MonoTime) -> Option<Dequeued> {
        let entry = self.q.pop_front()?;
        Some(self.core.release_entry(entry, now))
    }

    fn evict_expired(&mut self, now: MonoTime, max_age_ms: u64, pool: &mut dyn PacketPool) -> usize {
        let before = self.q.len();
        let mut kept = VecDeque::with_capacity(self.q.capacity());
        for entry in self.q.drain(..) {
            if entry.is_expired(now, max_age_ms) {
                pool.release(entry.packet);
            } else {
                kept.push_back(entry);
            }
        }
        self.q = kept;
        let evicted = before - self.q.len();
        self.core.stats.record_expired(evicted as u64);
        evicted
    }

    fn clear(&mut self, pool: &mut dyn PacketPool) -> usize {
        let n = self.q.len();
        for entry in self.q.drain(..) {
            pool.release(entry.packet);
        }
        n
    }

    fn len(&self) -> usize {
        self.q.len()
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
