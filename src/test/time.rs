use std::time::Duration;

use crate::error::ConfigError;
use crate::time::{Clock, ManualClock, MonoTime, SECS_PER_DAY, SystemClock, TimeOfDay};

use super::tod;

#[test]
fn mono_time_unit_conversions() {
    assert_eq!(MonoTime::from_millis(1), MonoTime(1));
    assert_eq!(MonoTime::from_secs(1), MonoTime(1_000));
    assert_eq!(MonoTime::from_secs(u64::MAX), MonoTime(u64::MAX));
}

#[test]
fn mono_time_arithmetic_saturates() {
    assert_eq!(MonoTime(5).millis_since(MonoTime(10)), 0);
    assert_eq!(MonoTime(10).millis_since(MonoTime(4)), 6);
    assert_eq!(
        MonoTime(u64::MAX - 1).saturating_add(Duration::from_secs(1)),
        MonoTime(u64::MAX)
    );
}

#[test]
fn time_of_day_parses_and_displays_hh_mm() {
    let t = tod("7:05");
    assert_eq!((t.hour(), t.minute()), (7, 5));
    assert_eq!(t.to_string(), "07:05");
    assert_eq!(tod("23:59").minutes_since_midnight(), 1_439);
}

#[test]
fn time_of_day_rejects_out_of_range_and_garbage() {
    assert!(matches!("24:00".parse::<TimeOfDay>(), Err(ConfigError::HourOutOfRange(24))));
    assert!(matches!("12:60".parse::<TimeOfDay>(), Err(ConfigError::MinuteOutOfRange(60))));
    assert!(matches!("noon".parse::<TimeOfDay>(), Err(ConfigError::InvalidTime(_))));
    assert!(matches!("12-30".parse::<TimeOfDay>(), Err(ConfigError::InvalidTime(_))));
}

#[test]
fn time_of_day_from_secs_wraps_daily() {
    assert_eq!(TimeOfDay::from_secs_of_day(0), TimeOfDay::MIDNIGHT);
    assert_eq!(TimeOfDay::from_secs_of_day(86_400 + 3_660), tod("01:01"));
}

#[test]
fn manual_clock_advances_both_clocks_and_wraps_midnight() {
    let clock = ManualClock::starting_at(tod("23:59"));
    let shared = clock.clone();

    shared.advance(Duration::from_millis(500));
    let r = clock.now();
    assert_eq!(r.mono, MonoTime(500));
    assert_eq!(r.time_of_day, tod("23:59"));

    shared.advance(Duration::from_secs(60));
    let r = clock.now();
    assert_eq!(r.mono, MonoTime(60_500));
    assert_eq!(r.time_of_day, tod("00:00"));
    assert_eq!(r.secs_of_day, 0);
}

#[test]
fn manual_clock_wall_jump_leaves_monotonic_time_alone() {
    let clock = ManualClock::starting_at(tod("08:00"));
    clock.advance_millis(1_000);
    clock.set_time_of_day(tod("20:30"));
    let r = clock.now();
    assert_eq!(r.mono, MonoTime(1_000));
    assert_eq!(r.time_of_day, tod("20:30"));
}

fn offset_between(base: u32, shifted: u32) -> u32 {
    (shifted + SECS_PER_DAY - base) % SECS_PER_DAY
}

#[test]
fn system_clock_applies_utc_offset_modulo_a_day() {
    let utc = SystemClock::new();
    let ahead = SystemClock::with_utc_offset_minutes(60);
    let behind = SystemClock::with_utc_offset_minutes(-90);

    let base = utc.now();
    let plus = ahead.now();
    let minus = behind.now();

    // A second boundary may pass between samples.
    assert!((3_600..=3_601).contains(&offset_between(base.secs_of_day, plus.secs_of_day)));
    let minus_off = offset_between(base.secs_of_day, minus.secs_of_day);
    assert!((SECS_PER_DAY - 5_400..=SECS_PER_DAY - 5_399).contains(&minus_off));

    for r in [base, plus, minus] {
        assert!(r.secs_of_day < SECS_PER_DAY);
        assert_eq!(r.time_of_day, TimeOfDay::from_secs_of_day(u64::from(r.secs_of_day)));
    }
}

#[test]
fn system_clock_monotonic_time_never_decreases() {
    let clock = SystemClock::default();
    let mut last = clock.now().mono;
    for _ in 0..1_000 {
        let now = clock.now().mono;
        assert!(now >= last);
        last = now;
    }
}
