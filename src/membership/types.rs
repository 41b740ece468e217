use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::time::Instant;

/// Namespace prefix carried by every node name of this service.
///
/// A gossip cluster may be shared with unrelated node types; only names starting
/// with this prefix are reported as peers.
pub const NODE_NAME_PREFIX: &str = "setserver";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeName(pub String);

impl NodeName {
    /// `<prefix>-<random uuid>`
    pub fn generate() -> Self {
        Self(format!("{}-{}", NODE_NAME_PREFIX, uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_service_prefix(&self) -> bool {
        self.0.starts_with(NODE_NAME_PREFIX)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MemberStatus {
    Alive,
    Leaving,
    Left,
    Failed,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Alive => "alive",
            MemberStatus::Leaving => "leaving",
            MemberStatus::Left => "left",
            MemberStatus::Failed => "failed",
        }
    }

    /// Left or failed: kept only until reaped, never introduced to a node that lacks it.
    pub fn is_tombstone(&self) -> bool {
        matches!(self, MemberStatus::Left | MemberStatus::Failed)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member as tracked by the gossip layer.
///
/// `incarnation` is a logical clock owned by the member itself; a higher incarnation
/// always wins when two views of the same member disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: NodeName,
    pub addr: SocketAddr,
    pub status: MemberStatus,
    pub incarnation: u64,

    #[serde(skip)]
    pub last_seen: Option<Instant>,
}

/// Peer view handed out by the membership manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// `host:port`
    pub addr: String,
    pub status: String,
}

impl From<&MemberRecord> for Member {
    fn from(record: &MemberRecord) -> Self {
        Self {
            name: record.name.to_string(),
            addr: record.addr.to_string(),
            status: record.status.to_string(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.addr, self.status)
    }
}

/// The wire protocol for inter-node communication.
///
/// - `Ping/Ack`: liveness checks; the ack piggybacks a bounded random sample of the
///   sender's member list.
/// - `PingReq/IndirectAck`: a suspected member is probed through other members before it is
///   declared failed.
/// - `Join/JoinAck`: a new node announces itself to a seed and gets a full state sync back,
///   split over as many `JoinAck` datagrams as needed.
/// - `Leave`: graceful departure.
/// - `Failed/Alive`: disseminate failure suspicions and their refutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GossipMessage {
    Ping {
        from: NodeName,
        incarnation: u64,
    },

    Ack {
        from: NodeName,
        incarnation: u64,
        members: Vec<MemberRecord>,
    },

    PingReq {
        from: NodeName,
        target: NodeName,
        target_addr: SocketAddr,
    },

    IndirectAck {
        target: NodeName,
    },

    Join {
        member: MemberRecord,
    },

    JoinAck {
        from: NodeName,
        members: Vec<MemberRecord>,
    },

    Leave {
        name: NodeName,
        incarnation: u64,
    },

    Failed {
        name: NodeName,
        incarnation: u64,
    },

    Alive {
        name: NodeName,
        incarnation: u64,
    },
}
