//! Server Lifecycle Module
//!
//! Composes the set service and the membership manager into a running node.
//!
//! - **`lifecycle`**: Binds the listen address and serves the RPC routes until shutdown.
//! - **`monitor`**: Periodically logs the current peer view while the server runs.
//! - **`shutdown`**: Signal handling for the binary.

pub mod lifecycle;
pub mod monitor;
pub mod shutdown;

#[cfg(test)]
mod tests;
