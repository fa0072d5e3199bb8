//! Identifiers
//!
//! Packet and mesh-node identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mesh packet id (unique per sender).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PacketId(pub u32);

/// Mesh node number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeNum(pub u32);

impl NodeNum {
    pub const BROADCAST: NodeNum = NodeNum(u32::MAX);
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Display for NodeNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == NodeNum::BROADCAST {
            f.write_str("^all")
        } else {
            write!(f, "!{:08x}", self.0)
        }
    }
}
