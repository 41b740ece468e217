//! Membership & Discovery Module
//!
//! Registers this node in a gossip cluster and tracks its peers.
//!
//! ## Core Mechanisms
//! - **Gossip Protocol**: Agents periodically ping a random peer over UDP; acks carry the full
//!   member list so every view converges on the same cluster membership.
//! - **Failure Detection**: A member silent for too long is declared failed; the member refutes
//!   the report by bumping its incarnation number.
//! - **Namespacing**: Node names are `setserver-<uuid>`. The cluster may host other node types;
//!   peer listings only include names carrying the prefix.
//!
//! ## Submodules
//! - **`manager`**: Register/deregister lifecycle and peer enumeration.
//! - **`agent`**: The traits the manager drives, so tests can substitute the network.
//! - **`gossip`**: The UDP agent.
//! - **`handlers`**: axum handler listing the peers.
//! - **`types`**: Names, statuses, member views and the wire messages.

pub mod agent;
pub mod gossip;
pub mod handlers;
pub mod manager;
pub mod types;
