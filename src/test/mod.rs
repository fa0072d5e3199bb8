use std::collections::VecDeque;

use crate::net::{BoundedPool, Packet, PacketId, PacketPriority, PortNum, Radio, TxErrorKind, TxFailure};
use crate::queue::QueueStrategy;
use crate::sched::{SchedulerConfig, TransmitScheduler};
use crate::time::{ManualClock, TimeOfDay};
use crate::window::{Mode, TimeWindowConfig};

mod time;
mod window_clock;

pub(crate) fn tod(s: &str) -> TimeOfDay {
    s.parse().expect("valid time of day")
}

pub(crate) fn pkt(id: u32) -> Packet {
    Packet::zeroed(PacketId(id))
}

/// Packet whose priority score is exactly `score` (1..=5).
pub(crate) fn scored(id: u32, score: u8) -> Packet {
    let p = pkt(id);
    match score {
        1 => p,
        2 => p.with_port(PortNum::Position, Vec::new()),
        3 => p.with_want_ack(true),
        4 => p.with_priority(PacketPriority::Reliable),
        5 => p.with_port(PortNum::Emergency, Vec::new()),
        _ => panic!("no canned packet for score {score}"),
    }
}

/// Radio that follows a script: one entry per transmit attempt, `None` (or an
/// exhausted script) means success.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRadio {
    pub sent: Vec<PacketId>,
    pub attempts: usize,
    script: VecDeque<Option<TxErrorKind>>,
    airtime: Option<(ManualClock, u64)>,
}

impl ScriptedRadio {
    pub fn with_script(script: &[Option<TxErrorKind>]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Each transmit attempt advances `clock` by `ms`.
    pub fn with_airtime(clock: ManualClock, ms: u64) -> Self {
        Self {
            airtime: Some((clock, ms)),
            ..Self::default()
        }
    }

    pub fn push_script(&mut self, step: Option<TxErrorKind>) {
        self.script.push_back(step);
    }
}

impl Radio for ScriptedRadio {
    fn transmit(&mut self, pkt: Packet) -> Result<(), TxFailure> {
        self.attempts += 1;
        if let Some((clock, ms)) = &self.airtime {
            clock.advance_millis(*ms);
        }
        match self.script.pop_front().flatten() {
            None => {
                self.sent.push(pkt.id);
                Ok(())
            }
            Some(TxErrorKind::Transient) => Err(TxFailure::transient(pkt)),
            Some(TxErrorKind::InvalidPacket) => Err(TxFailure::invalid(pkt)),
        }
    }
}

pub(crate) type TestScheduler = TransmitScheduler<ScriptedRadio, BoundedPool, ManualClock>;

/// 09:00-17:00 window with a long expiry so hour-long waits don't evict.
pub(crate) fn office_hours(mode: Mode) -> TimeWindowConfig {
    let mut cfg = TimeWindowConfig::window(tod("09:00"), tod("17:00"), mode);
    cfg.packet_expire_secs = 7_200;
    cfg
}

pub(crate) fn scheduler_at(
    strategy: QueueStrategy,
    cfg: &TimeWindowConfig,
    radio: ScriptedRadio,
    clock: &ManualClock,
) -> TestScheduler {
    let config = SchedulerConfig {
        strategy,
        ..SchedulerConfig::default()
    };
    TransmitScheduler::new(config, cfg, radio, BoundedPool::new(256), clock.clone())
}
