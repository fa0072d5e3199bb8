//! Hold queue for packets waiting on the transmit window
//!
//! Two interchangeable strategies behind one trait: arrival order
//! ([`FifoQueue`]) and priority order ([`PriorityQueue`]). Which one a node
//! uses is picked once, when the scheduler is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::{Packet, PacketPool};
use crate::time::MonoTime;

mod entry;
mod fifo;
mod priority;
mod stats;

pub use entry::{Dequeued, QueueEntry};
pub use fifo::FifoQueue;
pub use priority::PriorityQueue;
pub use stats::{HIGH_PRIORITY_THRESHOLD, QueueStatistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    Fifo,
    #[default]
    Priority,
}

impl QueueStrategy {
    pub fn build(self, capacity: usize) -> Box<dyn PacketQueue> {
        match self {
            QueueStrategy::Fifo => Box::new(FifoQueue::new(capacity)),
            QueueStrategy::Priority => Box::new(PriorityQueue::new(capacity)),
        }
    }
}

/// Bounded packet queue abstraction.
pub trait PacketQueue: fmt::Debug + Send {
    /// Inserts `pkt` stamped with `now`. When full the packet comes back in
    /// `Err` untouched and an overflow is counted.
    fn enqueue(&mut self, pkt: Packet, now: MonoTime) -> Result<(), Packet>;

    /// Removes the next packet per the queue's ordering and records how long it waited.
    fn dequeue(&mut self, now: MonoTime) -> Option<Dequeued>;

    /// Releases every entry that has waited at least `max_age_ms`. Returns how many.
    fn evict_expired(&mut self, now: MonoTime, max_age_ms: u64, pool: &mut dyn PacketPool) -> usize;

    /// Releases every held packet. Statistics are kept.
    fn clear(&mut self, pool: &mut dyn PacketPool) -> usize;

    fn len(&self) -> usize;
    fn capacity(&self) -> usize;

    /// Changes the bound. Entries above a lowered bound stay until drained.
    fn set_capacity(&mut self, capacity: usize);

    fn stats(&self) -> &QueueStatistics;
    fn stats_mut(&mut self) -> &mut QueueStatistics;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    fn avg_queue_time_ms(&self) -> u64 {
        self.stats().avg_queue_time_ms()
    }
}
