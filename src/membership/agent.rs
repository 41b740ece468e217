//! Gossip Agent Seam
//!
//! The membership manager only needs a handful of capabilities from the gossip layer:
//! create, join, leave, shutdown and a member listing. They are expressed as traits so
//! the manager can be driven by the UDP implementation in production and by fakes in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use super::gossip::UdpGossipAgent;
use super::types::{MemberRecord, NodeName};

/// Identity and address of a local agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub node_name: NodeName,
    /// Bound and advertised to other members.
    pub bind_addr: SocketAddr,
}

/// Protocol timings of the UDP agent.
#[derive(Debug, Clone)]
pub struct GossipTiming {
    pub gossip_interval: Duration,
    pub failure_detection_interval: Duration,
    /// Silence after which an alive member becomes suspected and is probed indirectly.
    pub failure_timeout: Duration,
    /// How long a suspected member has to answer a probe before it is declared failed.
    pub suspicion_timeout: Duration,
    /// Members asked to probe a suspect on our behalf.
    pub indirect_probes: usize,
    /// How long left and failed members stay listed before they are forgotten.
    pub reap_timeout: Duration,
    /// Per-attempt wait for a seed's `JoinAck`.
    pub join_timeout: Duration,
    pub join_attempts: usize,
}

impl Default for GossipTiming {
    fn default() -> Self {
        Self {
            gossip_interval: Duration::from_millis(500),
            failure_detection_interval: Duration::from_secs(1),
            failure_timeout: Duration::from_secs(5),
            suspicion_timeout: Duration::from_secs(5),
            indirect_probes: 3,
            reap_timeout: Duration::from_secs(60),
            join_timeout: Duration::from_millis(700),
            join_attempts: 3,
        }
    }
}

#[async_trait]
pub trait GossipAgent: Send + Sync {
    fn name(&self) -> &NodeName;

    /// Address other members use to reach this agent.
    fn advertise_addr(&self) -> SocketAddr;

    /// Contacts every seed and merges their full member list.
    ///
    /// Returns the number of seeds that answered. Fails when seeds were given but none answered.
    async fn join(&self, seeds: &[String]) -> Result<usize>;

    /// Broadcasts a graceful leave to the live members.
    async fn leave(&self) -> Result<()>;

    /// Stops the background loops and waits for them to finish. Idempotent.
    ///
    /// The socket is released once the last handle to the agent is dropped.
    async fn shutdown(&self);

    /// Every member known to this agent, itself included.
    fn members(&self) -> Vec<MemberRecord>;
}

#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn create(&self, config: AgentConfig) -> Result<Arc<dyn GossipAgent>>;
}

/// Creates [`UdpGossipAgent`]s.
#[derive(Debug, Clone, Default)]
pub struct UdpAgentFactory {
    timing: GossipTiming,
}

impl UdpAgentFactory {
    pub fn new(timing: GossipTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl AgentFactory for UdpAgentFactory {
    async fn create(&self, config: AgentConfig) -> Result<Arc<dyn GossipAgent>> {
        let agent: Arc<dyn GossipAgent> =
            UdpGossipAgent::create(config, self.timing.clone()).await?;
        Ok(agent)
    }
}
