//! Transmit-window scheduler for low-power mesh radio nodes.
//!
//! Every outbound packet is either sent, held until the daily transmit window
//! opens, or discarded, depending on the configured [`window::Mode`]. Held
//! packets are drained under a per-cycle budget once the window reopens.

pub mod error;
pub mod net;
pub mod queue;
pub mod sched;
pub mod time;
pub mod window;

pub use error::{ConfigError, SendError};

#[cfg(test)]
mod test;
