use crate::window::{Mode, TimeWindowConfig, is_open, secs_until_transition};

use super::tod;

fn window(start: &str, end: &str) -> TimeWindowConfig {
    TimeWindowConfig::window(tod(start), tod(end), Mode::DropPackets)
}

#[test]
fn window_spanning_midnight_wraps() {
    let cfg = window("22:00", "04:00");
    assert!(cfg.wraps_midnight());
    assert!(is_open(&cfg, tod("23:59")));
    assert!(is_open(&cfg, tod("00:00")));
    assert!(is_open(&cfg, tod("03:59")));
    assert!(!is_open(&cfg, tod("04:00")));
    assert!(!is_open(&cfg, tod("21:59")));
    assert!(is_open(&cfg, tod("22:00")));
}

#[test]
fn same_day_window_is_start_inclusive_end_exclusive() {
    let cfg = window("09:00", "17:00");
    assert!(!cfg.wraps_midnight());
    assert!(!is_open(&cfg, tod("08:59")));
    assert!(is_open(&cfg, tod("09:00")));
    assert!(is_open(&cfg, tod("16:59")));
    assert!(!is_open(&cfg, tod("17:00")));
}

#[test]
fn disabled_window_is_always_open() {
    let mut cfg = window("09:00", "09:01");
    cfg.enabled = false;
    for minute in 0..1_440u64 {
        let t = crate::time::TimeOfDay::from_secs_of_day(minute * 60);
        assert!(is_open(&cfg, t), "closed at {t}");
    }
}

#[test]
fn equal_start_and_end_never_opens() {
    let cfg = window("12:00", "12:00");
    assert!(!is_open(&cfg, tod("12:00")));
    assert!(!is_open(&cfg, tod("00:00")));
    assert_eq!(secs_until_transition(&cfg, 0), None);
}

#[test]
fn next_transition_counts_down_to_the_next_edge() {
    let cfg = window("09:00", "17:00");
    // 08:59:30, closed: opens in 30s.
    assert_eq!(secs_until_transition(&cfg, 8 * 3600 + 59 * 60 + 30), Some(30));
    // 16:00:00, open: closes in an hour.
    assert_eq!(secs_until_transition(&cfg, 16 * 3600), Some(3_600));
    // 17:00:00, just closed: opens again tomorrow at 09:00.
    assert_eq!(secs_until_transition(&cfg, 17 * 3600), Some(16 * 3600));
}

#[test]
fn next_transition_handles_wrapping_windows() {
    let cfg = window("22:00", "04:00");
    assert_eq!(secs_until_transition(&cfg, 23 * 3600), Some(5 * 3600));
    assert_eq!(secs_until_transition(&cfg, 4 * 3600), Some(18 * 3600));
}

#[test]
fn next_transition_is_none_when_disabled() {
    let mut cfg = window("09:00", "17:00");
    cfg.enabled = false;
    assert_eq!(secs_until_transition(&cfg, 0), None);
}
