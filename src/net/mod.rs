//! Mesh packet boundary
//!
//! Packets as the scheduler sees them, plus the pool and radio collaborators
//! that take packets back or put them on air.

mod id;
mod packet;
mod pool;
mod radio;

pub use id::{NodeNum, PacketId};
pub use packet::{Packet, PacketPriority, Payload, PortNum};
pub use pool::{BoundedPool, PacketPool};
pub use radio::{Radio, TxErrorKind, TxFailure};
