//! Operator override
//!
//! Forces the window open or closed for a bounded time, superseding the clock.

use std::time::Duration;

use tracing::info;

use crate::time::MonoTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverrideState {
    pub active: bool,
    pub forced_value: bool,
    pub expiry: MonoTime,
}

#[derive(Debug, Default)]
pub struct OverrideController {
    state: OverrideState,
}

impl OverrideController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the window to `open` until `now + duration`. Re-arming replaces
    /// any override already in effect.
    pub fn force(&mut self, open: bool, duration: Duration, now: MonoTime) {
        self.state = OverrideState {
            active: true,
            forced_value: open,
            expiry: now.saturating_add(duration),
        };
        info!(open, secs = duration.as_secs(), "window override armed");
    }

    /// The forced verdict while the override lasts. Deactivates once expired.
    pub fn current(&mut self, now: MonoTime) -> Option<bool> {
        if !self.state.active {
            return None;
        }
        if now < self.state.expiry {
            return Some(self.state.forced_value);
        }
        self.state.active = false;
        info!(open = self.state.forced_value, "window override expired");
        None
    }

    /// Read-only variant of [`current`](Self::current) for status reporting.
    pub fn peek(&self, now: MonoTime) -> Option<bool> {
        (self.state.active && now < self.state.expiry).then_some(self.state.forced_value)
    }

    pub fn state(&self) -> OverrideState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = OverrideState::default();
    }
}
