//! Time sources
//!
//! Monotonic instants, local time-of-day, and the clock boundary the scheduler
//! reads both from.

mod clock;
mod mono;
mod time_of_day;

pub use clock::{Clock, ClockReading, ManualClock, SystemClock};
pub use mono::MonoTime;
pub use time_of_day::{MINUTES_PER_DAY, SECS_PER_DAY, TimeOfDay};
