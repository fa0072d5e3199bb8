//! Transmit window
//!
//! Daily window configuration, the pure open/closed evaluation, and the
//! operator override that can temporarily replace it.

mod clock;
mod config;
mod override_ctl;

pub use clock::{is_open, secs_until_transition};
pub use config::{
    DEFAULT_EXPIRE_SECS, DEFAULT_QUEUE_SIZE, MAX_QUEUE_SIZE, Mode, TimeWindowConfig,
};
pub use override_ctl::{OverrideController, OverrideState};
