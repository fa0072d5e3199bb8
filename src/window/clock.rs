//! Window evaluation
//!
//! Pure functions of (config, local time). Start is inclusive, end exclusive.

use crate::time::{MINUTES_PER_DAY, TimeOfDay};

use super::config::TimeWindowConfig;

/// Whether transmission is allowed at `tod`. A disabled window never restricts.
pub fn is_open(cfg: &TimeWindowConfig, tod: TimeOfDay) -> bool {
    if !cfg.enabled {
        return true;
    }
    in_window(cfg.start_minutes(), cfg.end_minutes(), tod.minutes_since_midnight())
}

fn in_window(start: u16, end: u16, current: u16) -> bool {
    if start <= end {
        current >= start && current < end
    } else {
        current >= start || current < end
    }
}

/// Seconds from `secs_of_day` until [`is_open`] next changes value.
///
/// `None` when the window is disabled or `start == end` (permanently closed).
pub fn secs_until_transition(cfg: &TimeWindowConfig, secs_of_day: u32) -> Option<u32> {
    if !cfg.enabled || cfg.start_minutes() == cfg.end_minutes() {
        return None;
    }
    let day = u32::from(MINUTES_PER_DAY);
    let current = (secs_of_day / 60) % day;
    let open = in_window(cfg.start_minutes(), cfg.end_minutes(), current as u16);
    let target = u32::from(if open { cfg.end_minutes() } else { cfg.start_minutes() });
    let minutes = (target + day - current) % day;
    Some(minutes * 60 - secs_of_day % 60)
}
