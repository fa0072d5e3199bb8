//! Queue statistics
//!
//! Counters only ever grow; [`QueueStatistics::reset`] is the one way back to zero.

use serde::{Deserialize, Serialize};

/// Scores above this count as high priority in the sent counters.
pub const HIGH_PRIORITY_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatistics {
    /// Successful enqueues, re-enqueues after a failed send included.
    pub total_queued: u64,
    /// Entries evicted for age.
    pub expired: u64,
    /// Enqueue attempts rejected because the queue was full.
    pub overflows: u64,
    /// Packets released without ever being transmitted.
    pub dropped: u64,
    pub high_priority_sent: u64,
    pub normal_priority_sent: u64,
    /// Sum of waits of dequeued packets (ms).
    pub total_queue_time_ms: u64,
    pub max_queue_time_ms: u64,
}

impl QueueStatistics {
    /// `total_queue_time / total_queued`, zero before anything was queued.
    pub fn avg_queue_time_ms(&self) -> u64 {
        if self.total_queued == 0 {
            0
        } else {
            self.total_queue_time_ms / self.total_queued
        }
    }

    pub(crate) fn record_enqueue(&mut self) {
        self.total_queued = self.total_queued.saturating_add(1);
    }

    pub(crate) fn record_overflow(&mut self) {
        self.overflows = self.overflows.saturating_add(1);
    }

    pub(crate) fn record_expired(&mut self, n: u64) {
        self.expired = self.expired.saturating_add(n);
    }

    pub(crate) fn record_dropped(&mut self) {
        self.dropped = self.dropped.saturating_add(1);
    }

    pub(crate) fn record_wait(&mut self, waited_ms: u64) {
        self.total_queue_time_ms = self.total_queue_time_ms.saturating_add(waited_ms);
        self.max_queue_time_ms = self.max_queue_time_ms.max(waited_ms);
    }

    pub(crate) fn record_sent(&mut self, priority: u8) {
        if priority > HIGH_PRIORITY_THRESHOLD {
            self.high_priority_sent = self.high_priority_sent.saturating_add(1);
        } else {
            self.normal_priority_sent = self.normal_priority_sent.saturating_add(1);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
