//! Set Service Module
//!
//! Exposes a mutable set of string items over RPC. The actual storage lives behind the
//! [`backend::SetBackend`] trait so the node can be wired to any implementation.
//!
//! ## Submodules
//! - **`backend`**: The storage capability plus the bundled in-memory and stub backends.
//! - **`protocol`**: Wire DTOs (`Item`, `Response`) and endpoint paths.
//! - **`service`**: Translates backend outcomes into `Response` envelopes.
//! - **`handlers`**: axum handlers mounted by the server.
//! - **`client`**: HTTP client for the RPC surface.
//!
//! Set contents are local to each node. Nothing is replicated between peers.

pub mod backend;
pub mod client;
pub mod handlers;
pub mod protocol;
pub mod service;
