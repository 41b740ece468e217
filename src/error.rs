//! Error types shared across the node.

use std::net::SocketAddr;

/// Errors produced by a [`SetBackend`](crate::set::backend::SetBackend).
#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("not implemented")]
    NotImplemented,

    #[error("{0}")]
    Backend(String),
}

impl SetError {
    pub fn backend<T: Into<String>>(msg: T) -> Self {
        Self::Backend(msg.into())
    }
}

/// Failures of the cluster registration lifecycle.
///
/// None of these are fatal; the caller decides what to do with them.
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("already registered")]
    AlreadyRegistered,

    #[error("not registered")]
    NotRegistered,

    #[error("invalid bind address {addr:?}: {source}")]
    AddressParse {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create gossip agent: {0}")]
    AgentCreate(#[source] anyhow::Error),

    #[error("cannot join cluster: {0}")]
    Join(#[source] anyhow::Error),

    #[error("cannot leave cluster: {0}")]
    Leave(#[source] anyhow::Error),
}

/// Failures of the RPC transport.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot resolve listen address {addr:?}: {reason}")]
    Resolve { addr: String, reason: String },

    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
