//! Cluster Registration
//!
//! Owns this node's single registration in the gossip cluster. The agent handle sits behind
//! one async lock that every operation takes, including peer enumeration, so a peer listing
//! never observes a half-torn-down agent.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::agent::{AgentConfig, AgentFactory, GossipAgent, UdpAgentFactory};
use super::types::{Member, NodeName};
use crate::error::MembershipError;

pub struct MembershipManager {
    factory: Arc<dyn AgentFactory>,
    agent: Mutex<Option<Arc<dyn GossipAgent>>>,
}

impl MembershipManager {
    /// Manager backed by the UDP gossip agent with default timings.
    pub fn new() -> Arc<Self> {
        Self::with_factory(Arc::new(UdpAgentFactory::default()))
    }

    pub fn with_factory(factory: Arc<dyn AgentFactory>) -> Arc<Self> {
        Arc::new(Self {
            factory,
            agent: Mutex::new(None),
        })
    }

    /// Joins the cluster through `seeds` under a freshly generated node name.
    ///
    /// An empty seed list starts a new cluster. On any failure after the local agent was
    /// created, the agent is shut down before the error is returned.
    pub async fn register_self(
        &self,
        seeds: &[String],
        bind_addr: &str,
    ) -> Result<(), MembershipError> {
        let mut slot = self.agent.lock().await;

        if slot.is_some() {
            return Err(MembershipError::AlreadyRegistered);
        }

        let bind_addr = parse_bind_addr(bind_addr).await?;
        let config = AgentConfig {
            node_name: NodeName::generate(),
            bind_addr,
        };

        info!("Registering {} on {}", config.node_name, config.bind_addr);

        let agent = self
            .factory
            .create(config)
            .await
            .map_err(MembershipError::AgentCreate)?;

        match agent.join(seeds).await {
            Ok(answered) => {
                info!(
                    "{} registered ({} of {} seed(s) answered)",
                    agent.name(),
                    answered,
                    seeds.len()
                );
            }
            Err(e) => {
                tracing::warn!("Join failed, shutting down agent {}", agent.name());
                agent.shutdown().await;
                return Err(MembershipError::Join(e));
            }
        }

        *slot = Some(agent);
        Ok(())
    }

    /// Leaves the cluster.
    ///
    /// The local agent is shut down and the registration cleared whether or not the leave
    /// broadcast succeeded; a leave failure is still reported.
    pub async fn deregister_self(&self) -> Result<(), MembershipError> {
        let mut slot = self.agent.lock().await;

        let Some(agent) = slot.take() else {
            return Err(MembershipError::NotRegistered);
        };

        let left = agent.leave().await;
        agent.shutdown().await;

        match left {
            Ok(()) => {
                info!("{} deregistered", agent.name());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{} shut down without a clean leave: {}", agent.name(), e);
                Err(MembershipError::Leave(e))
            }
        }
    }

    /// Other members of this service known to the local agent, sorted by name.
    ///
    /// Members whose name lacks the service prefix are skipped, as is this node itself.
    /// Empty when not registered.
    pub async fn peers(&self) -> Vec<Member> {
        let slot = self.agent.lock().await;

        let Some(agent) = slot.as_ref() else {
            return Vec::new();
        };

        let local = agent.name();
        let mut peers: Vec<Member> = agent
            .members()
            .iter()
            .filter(|record| &record.name != local && record.name.has_service_prefix())
            .map(Member::from)
            .collect();

        peers.sort_by(|a, b| a.name.cmp(&b.name));
        peers
    }

    pub async fn is_registered(&self) -> bool {
        self.agent.lock().await.is_some()
    }

    /// This node's own entry, if registered.
    pub async fn local_member(&self) -> Option<Member> {
        let slot = self.agent.lock().await;
        let agent = slot.as_ref()?;

        Some(Member {
            name: agent.name().to_string(),
            addr: agent.advertise_addr().to_string(),
            status: agent
                .members()
                .iter()
                .find(|record| &record.name == agent.name())
                .map(|record| record.status.to_string())
                .unwrap_or_else(|| "alive".to_string()),
        })
    }
}

/// Resolves `host:port`, preferring an IPv4 address when the host has several.
pub async fn parse_bind_addr(bind_addr: &str) -> Result<SocketAddr, MembershipError> {
    let parse_error = |source: std::io::Error| MembershipError::AddressParse {
        addr: bind_addr.to_string(),
        source,
    };

    let candidates: Vec<SocketAddr> = tokio::net::lookup_host(bind_addr)
        .await
        .map_err(parse_error)?
        .collect();

    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| {
            parse_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "host resolved to no addresses",
            ))
        })
}
