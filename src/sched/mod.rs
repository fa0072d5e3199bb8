//! Transmit scheduling
//!
//! Admission (send now, hold, or discard), the drain loop that empties the
//! hold queue once the window reopens, and the operator command surface.

mod command;
mod policy;
mod report;
mod scheduler;

pub use command::{Command, Response};
pub use policy::{DiscardReason, Disposition, evaluate, window_verdict};
pub use report::{StatsReport, StatusReport};
pub use scheduler::{DrainBudget, SchedulerConfig, SendOutcome, TransmitScheduler, WindowState};
