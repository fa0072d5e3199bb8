//! Transmit scheduler
//!
//! Owns the hold queue and sits between the mesh stack and the radio. Runs on
//! a single thread of control; every operation takes `&mut self`, so a
//! multi-threaded host puts the whole scheduler behind one lock.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::SendError;
use crate::net::{Packet, PacketPool, Radio, TxErrorKind, TxFailure};
use crate::queue::{Dequeued, PacketQueue, QueueStatistics, QueueStrategy};
use crate::time::{Clock, ClockReading, MonoTime};
use crate::window::{Mode, OverrideController, TimeWindowConfig};

use super::policy::{self, DiscardReason, Disposition};

/// Limits on one drain cycle so draining never starves the rest of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainBudget {
    pub max_packets_per_cycle: usize,
    /// Advisory: checked before each packet, not enforced mid-transmit.
    pub max_cycle_duration_ms: u64,
    /// Minimum spacing of drains triggered from the send path.
    pub min_drain_interval_ms: u64,
}

impl Default for DrainBudget {
    fn default() -> Self {
        Self {
            max_packets_per_cycle: 10,
            max_cycle_duration_ms: 100,
            min_drain_interval_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub strategy: QueueStrategy,
    pub budget: DrainBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Allowed,
    Suppressed,
}

/// What became of a packet handed to [`TransmitScheduler::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Queued,
    Discarded(DiscardReason),
}

impl SendOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, SendOutcome::Discarded(_))
    }
}

pub struct TransmitScheduler<R, P, C> {
    pub(super) queue: Box<dyn PacketQueue>,
    radio: R,
    pub(super) pool: P,
    pub(super) clock: C,
    budget: DrainBudget,
    pub(super) overrides: OverrideController,
    state: WindowState,
    last_drain: Option<MonoTime>,
    /// The last drain cycle ended on a transient radio failure.
    stalled: bool,
}

impl<R: Radio, P: PacketPool, C: Clock> TransmitScheduler<R, P, C> {
    /// Builds a scheduler with the strategy fixed for its lifetime. The queue
    /// bound is taken from `window` and refreshed on every call.
    pub fn new(config: SchedulerConfig, window: &TimeWindowConfig, radio: R, pool: P, clock: C) -> Self {
        Self {
            queue: config.strategy.build(usize::from(window.max_queue_size)),
            radio,
            pool,
            clock,
            budget: config.budget,
            overrides: OverrideController::new(),
            state: WindowState::Allowed,
            last_drain: None,
            stalled: false,
        }
    }

    /// Admits one outbound packet.
    ///
    /// Discards are reported as `Ok(SendOutcome::Discarded(_))`; an `Err` only
    /// means the radio refused a packet that was allowed straight through.
    ///
    /// In queue mode a packet arriving while the last drain stalled on a
    /// transient failure is queued behind the backlog instead of sent.
    #[tracing::instrument(skip(self, cfg, pkt), fields(pkt_id = %pkt.id, from = %pkt.from, to = %pkt.to))]
    pub fn send(&mut self, cfg: &TimeWindowConfig, pkt: Packet) -> Result<SendOutcome, SendError> {
        self.queue.set_capacity(usize::from(cfg.max_queue_size));
        let now = self.clock.now();
        let open = self.observe(cfg, &now);

        // Get older packets out before this one when the window is open again.
        if open && cfg.enabled && !self.queue.is_empty() && self.drain_due(now.mono) {
            self.drain(cfg);
        }

        let now = self.clock.now();
        // Packets behind a stalled backlog wait their turn.
        if open && cfg.enabled && cfg.mode == Mode::QueuePackets && self.stalled && !self.queue.is_empty() {
            return Ok(self.hold(pkt, now.mono));
        }

        match policy::evaluate(cfg, &mut self.overrides, &now, pkt, self.queue.as_mut()) {
            Disposition::SendNow(pkt) => self.transmit_now(pkt),
            Disposition::Enqueued => {
                debug!(queue_len = self.queue.len(), "packet queued outside window");
                Ok(SendOutcome::Queued)
            }
            Disposition::Discard(reason, pkt) => {
                debug!(%reason, "dropping packet");
                self.discard(pkt);
                Ok(SendOutcome::Discarded(reason))
            }
        }
    }

    /// Sends queued packets while the window is open, within the drain budget.
    /// Returns how many were transmitted.
    ///
    /// A transient radio failure puts the packet back and ends the cycle, so
    /// later packets are never sent ahead of it.
    #[tracing::instrument(skip(self, cfg), fields(queue_len = self.queue.len()))]
    pub fn drain(&mut self, cfg: &TimeWindowConfig) -> usize {
        let start = self.clock.now();
        if !cfg.enabled || !self.observe(cfg, &start) {
            return 0;
        }
        self.queue.set_capacity(usize::from(cfg.max_queue_size));
        self.last_drain = Some(start.mono);
        self.stalled = false;

        let evicted = self
            .queue
            .evict_expired(start.mono, cfg.expire_millis(), &mut self.pool);
        if evicted > 0 {
            debug!(evicted, "evicted expired packets");
        }

        let mut processed = 0;
        while processed < self.budget.max_packets_per_cycle {
            let now = self.clock.now().mono;
            if now.millis_since(start.mono) >= self.budget.max_cycle_duration_ms {
                debug!(processed, "drain cycle out of time");
                break;
            }
            let Some(Dequeued { packet, priority, waited_ms }) = self.queue.dequeue(now) else {
                break;
            };
            let id = packet.id;
            match self.radio.transmit(packet) {
                Ok(()) => {
                    self.queue.stats_mut().record_sent(priority);
                    processed += 1;
                    trace!(pkt_id = %id, priority, waited_ms, "sent queued packet");
                }
                Err(TxFailure {
                    kind: TxErrorKind::InvalidPacket,
                    packet,
                }) => {
                    warn!(pkt_id = %id, "radio rejected queued packet, dropping");
                    self.discard(packet);
                }
                Err(TxFailure {
                    kind: TxErrorKind::Transient,
                    packet,
                }) => {
                    match self.queue.enqueue(packet, now) {
                        Ok(()) => warn!(pkt_id = %id, "failed to send queued packet, will retry later"),
                        Err(packet) => {
                            warn!(pkt_id = %id, "failed to requeue packet, dropping");
                            self.discard(packet);
                        }
                    }
                    self.stalled = true;
                    break;
                }
            }
        }

        if processed > 0 {
            debug!(processed, remaining = self.queue.len(), "drain cycle done");
        }
        processed
    }

    /// Forces the window open or closed for `secs` seconds from now.
    pub fn force_window(&mut self, open: bool, secs: u32) {
        let now = self.clock.now().mono;
        self.overrides
            .force(open, Duration::from_secs(u64::from(secs)), now);
    }

    /// Releases every queued packet. Statistics are kept.
    pub fn clear_queue(&mut self) -> usize {
        let n = self.queue.clear(&mut self.pool);
        info!(cleared = n, "packet queue cleared");
        n
    }

    /// Zeroes statistics and cancels any override.
    pub fn reset(&mut self) {
        self.queue.stats_mut().reset();
        self.overrides.reset();
        info!("time window statistics reset");
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queue_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn stats(&self) -> &QueueStatistics {
        self.queue.stats()
    }

    pub fn avg_queue_time_ms(&self) -> u64 {
        self.queue.avg_queue_time_ms()
    }

    /// Window state as of the last send or drain.
    pub fn window_state(&self) -> WindowState {
        self.state
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn transmit_now(&mut self, pkt: Packet) -> Result<SendOutcome, SendError> {
        match self.radio.transmit(pkt) {
            Ok(()) => Ok(SendOutcome::Sent),
            Err(TxFailure { kind, packet }) => {
                let id = packet.id;
                warn!(pkt_id = %id, %kind, "transmit failed");
                self.discard(packet);
                Err(SendError::Transmit { id, kind })
            }
        }
    }

    fn hold(&mut self, pkt: Packet, now: MonoTime) -> SendOutcome {
        match self.queue.enqueue(pkt, now) {
            Ok(()) => {
                debug!(queue_len = self.queue.len(), "radio stalled, queued behind backlog");
                SendOutcome::Queued
            }
            Err(pkt) => {
                self.discard(pkt);
                SendOutcome::Discarded(DiscardReason::QueueFull)
            }
        }
    }

    fn discard(&mut self, pkt: Packet) {
        self.queue.stats_mut().record_dropped();
        self.pool.release(pkt);
    }

    fn drain_due(&self, now: MonoTime) -> bool {
        self.last_drain
            .is_none_or(|t| now.millis_since(t) >= self.budget.min_drain_interval_ms)
    }

    fn observe(&mut self, cfg: &TimeWindowConfig, now: &ClockReading) -> bool {
        let open = policy::window_verdict(cfg, &mut self.overrides, now);
        let state = if open {
            WindowState::Allowed
        } else {
            WindowState::Suppressed
        };
        if state != self.state {
            info!(from = ?self.state, to = ?state, time = %now.time_of_day, "transmit window state changed");
            self.state = state;
        }
        open
    }
}
