//! Status and statistics snapshots for the telemetry collaborator.

use serde::Serialize;

use crate::net::{PacketPool, Radio};
use crate::queue::QueueStatistics;
use crate::time::Clock;
use crate::window::{Mode, TimeWindowConfig, is_open, secs_until_transition};

use super::scheduler::TransmitScheduler;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub enabled: bool,
    /// `HH:MM-HH:MM`
    pub window: String,
    pub mode: Mode,
    pub window_open: bool,
    pub override_active: bool,
    /// Seconds until the clock alone would flip the window.
    pub next_transition_secs: Option<u32>,
    pub queued_packets: usize,
    pub queue_capacity: usize,
    pub queue_full: bool,
    pub dropped_packets: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: QueueStatistics,
    pub avg_queue_time_ms: u64,
}

impl<R: Radio, P: PacketPool, C: Clock> TransmitScheduler<R, P, C> {
    pub fn status(&self, cfg: &TimeWindowConfig) -> StatusReport {
        let now = self.clock.now();
        let forced = if cfg.enabled {
            self.overrides.peek(now.mono)
        } else {
            None
        };
        StatusReport {
            enabled: cfg.enabled,
            window: cfg.window_label(),
            mode: cfg.mode,
            window_open: forced.unwrap_or_else(|| is_open(cfg, now.time_of_day)),
            override_active: forced.is_some(),
            next_transition_secs: secs_until_transition(cfg, now.secs_of_day),
            queued_packets: self.queue.len(),
            queue_capacity: self.queue.capacity(),
            queue_full: self.queue.is_full(),
            dropped_packets: self.queue.stats().dropped,
        }
    }

    pub fn stats_report(&self) -> StatsReport {
        StatsReport {
            stats: self.queue.stats().clone(),
            avg_queue_time_ms: self.queue.avg_queue_time_ms(),
        }
    }
}
