//! Admission policy
//!
//! Decides per packet whether it goes on air now, waits in the queue, or is
//! discarded. The packet travels inside the [`Disposition`], so whoever acts
//! on the decision is forced to send it or release it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::Packet;
use crate::queue::PacketQueue;
use crate::time::ClockReading;
use crate::window::{Mode, OverrideController, TimeWindowConfig, is_open};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    OutsideWindow,
    TransmitSuppressed,
    QueueFull,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscardReason::OutsideWindow => "outside time window",
            DiscardReason::TransmitSuppressed => "receive-only window",
            DiscardReason::QueueFull => "queue full",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
#[must_use = "a disposition holds the packet; send it or release it"]
pub enum Disposition {
    SendNow(Packet),
    /// The queue owns the packet now.
    Enqueued,
    Discard(DiscardReason, Packet),
}

/// Whether transmission is allowed right now. An active override replaces the
/// clock; with the window disabled nothing is restricted and overrides are moot.
pub fn window_verdict(cfg: &TimeWindowConfig, overrides: &mut OverrideController, now: &ClockReading) -> bool {
    if !cfg.enabled {
        return true;
    }
    overrides
        .current(now.mono)
        .unwrap_or_else(|| is_open(cfg, now.time_of_day))
}

pub fn evaluate(
    cfg: &TimeWindowConfig,
    overrides: &mut OverrideController,
    now: &ClockReading,
    pkt: Packet,
    queue: &mut dyn PacketQueue,
) -> Disposition {
    if window_verdict(cfg, overrides, now) {
        return Disposition::SendNow(pkt);
    }
    match cfg.mode {
        Mode::DropPackets => Disposition::Discard(DiscardReason::OutsideWindow, pkt),
        Mode::ReceiveOnly => Disposition::Discard(DiscardReason::TransmitSuppressed, pkt),
        Mode::QueuePackets => match queue.enqueue(pkt, now.mono) {
            Ok(()) => Disposition::Enqueued,
            Err(pkt) => Disposition::Discard(DiscardReason::QueueFull, pkt),
        },
    }
}
