//! Monotonic time
//!
//! Millisecond instants sampled from a monotonic source; never goes backwards.

use std::time::Duration;

/// Monotonic instant (milliseconds since an arbitrary epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct MonoTime(pub u64);

impl MonoTime {
    pub const ZERO: MonoTime = MonoTime(0);

    pub fn from_millis(ms: u64) -> MonoTime {
        MonoTime(ms)
    }

    pub fn from_secs(s: u64) -> MonoTime {
        MonoTime(s.saturating_mul(1_000))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn millis_since(self, earlier: MonoTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn saturating_add(self, d: Duration) -> MonoTime {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        MonoTime(self.0.saturating_add(ms))
    }
}
