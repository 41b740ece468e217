//! Set RPC Protocol
//!
//! Defines the endpoints and Data Transfer Objects used by clients to talk to a node.
//! Bodies are JSON over HTTP. Every well-formed call is answered with `200 OK` and a
//! [`Response`] envelope; the outcome lives in the envelope, not in the HTTP status.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Inserts an item.
pub const ENDPOINT_ADD: &str = "/set/add";
/// Removes an item.
pub const ENDPOINT_REMOVE: &str = "/set/remove";
/// Checks membership of an item.
pub const ENDPOINT_CONTAINS: &str = "/set/contains";
/// Lists the peers this node currently knows about.
pub const ENDPOINT_PEERS: &str = "/cluster/peers";

// --- Data Transfer Objects ---

/// Request body shared by all set operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item: String,
}

impl Item {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Outcome of a set operation.
///
/// For `add`, `present` is true when the item was already a member before the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: ResponseStatus,
    pub present: bool,
    pub error: String,
}

impl Response {
    pub fn success(present: bool) -> Self {
        Self {
            status: ResponseStatus::Success,
            present,
            error: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            present: false,
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
