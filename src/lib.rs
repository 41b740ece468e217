//! Gossip-Discovered Set Server Library
//!
//! A cluster node that serves a mutable set of string items over RPC and discovers its peers
//! through a gossip membership protocol. The binary (`main.rs`) wires these modules together.
//!
//! ## Architecture Modules
//! - **`set`**: The RPC-facing set service, its pluggable backend and the HTTP client.
//! - **`membership`**: Registration in the gossip cluster and peer enumeration, backed by a
//!   UDP SWIM-style agent.
//! - **`server`**: Serves the RPC routes and runs the periodic peer monitor until shutdown.
//! - **`config`**: Command-line and environment configuration of a node.
//! - **`error`**: Error types for the set backend, membership and transport.
//!
//! Only membership is shared between nodes. Set contents are not replicated.

pub mod config;
pub mod error;
pub mod membership;
pub mod server;
pub mod set;
