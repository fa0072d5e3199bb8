//! Clock boundary
//!
//! The scheduler never reads system time directly; it asks a [`Clock`] for a
//! reading that pairs the local time of day (window checks) with a monotonic
//! instant (queue ageing and drain pacing).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::mono::MonoTime;
use super::time_of_day::{SECS_PER_DAY, TimeOfDay};

/// One sample of both clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub time_of_day: TimeOfDay,
    /// Seconds since local midnight, for sub-minute transition countdowns.
    pub secs_of_day: u32,
    pub mono: MonoTime,
}

pub trait Clock {
    fn now(&self) -> ClockReading;
}

/// Host clock: `Instant` for monotonic time, UTC plus a fixed offset for local time.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    utc_offset_secs: i64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_utc_offset_minutes(0)
    }

    pub fn with_utc_offset_minutes(minutes: i32) -> Self {
        Self {
            origin: Instant::now(),
            utc_offset_secs: i64::from(minutes) * 60,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> ClockReading {
        // Before the epoch only happens with a badly set RTC; treat it as midnight.
        let utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let secs_of_day = (utc + self.utc_offset_secs).rem_euclid(i64::from(SECS_PER_DAY)) as u32;
        let mono_ms = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        ClockReading {
            time_of_day: TimeOfDay::from_secs_of_day(u64::from(secs_of_day)),
            secs_of_day,
            mono: MonoTime(mono_ms),
        }
    }
}

/// Externally driven clock. Clones share the same time, so a host (or test)
/// can keep a handle while the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    mono_ms: Arc<AtomicU64>,
    wall_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Starts at monotonic zero, at the given local time of day.
    pub fn starting_at(tod: TimeOfDay) -> Self {
        let clock = Self::default();
        clock.set_time_of_day(tod);
        clock
    }

    /// Moves both clocks forward.
    pub fn advance(&self, d: Duration) {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self.mono_ms.fetch_add(ms, Ordering::Relaxed);
        self.wall_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn advance_millis(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jumps the wall clock only (e.g. an RTC resync); monotonic time is untouched.
    pub fn set_time_of_day(&self, tod: TimeOfDay) {
        let ms = u64::from(tod.minutes_since_midnight()) * 60_000;
        self.wall_ms.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> ClockReading {
        let wall = (self.wall_ms.load(Ordering::Relaxed) / 1_000) % u64::from(SECS_PER_DAY);
        ClockReading {
            time_of_day: TimeOfDay::from_secs_of_day(wall),
            secs_of_day: wall as u32,
            mono: MonoTime(self.mono_ms.load(Ordering::Relaxed)),
        }
    }
}
