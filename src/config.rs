//! Node Configuration
//!
//! Command-line flags, each with an environment variable fallback.

use clap::Parser;
use std::time::Duration;

use crate::server::lifecycle::{DEFAULT_LISTEN_ADDR, ServerConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "crdt-server", version, about = "Set server node with gossip peer discovery")]
pub struct NodeConfig {
    /// Address the RPC server listens on (`:port` for all interfaces)
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Comma-separated `host:port` list of gossip members to join through
    #[arg(long, env = "SERF_CLUSTER_ADDRS", default_value = "")]
    pub cluster_addrs: String,

    /// `host:port` the local gossip agent binds and advertises
    #[arg(long, env = "SERF_AGENT_ADDR")]
    pub agent_addr: String,

    /// Seconds between peer listings in the log
    #[arg(long, env = "PEER_LOG_INTERVAL_SECS", default_value_t = 10)]
    pub peer_log_interval_secs: u64,

    /// Log filter, e.g. `info` or `crdt_server=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl NodeConfig {
    pub fn seed_addrs(&self) -> Vec<String> {
        split_seed_list(&self.cluster_addrs)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            listen_addr: self.listen.clone(),
            peer_log_interval: Duration::from_secs(self.peer_log_interval_secs.max(1)),
        }
    }
}

/// Splits a comma-separated seed list, dropping blank entries.
pub fn split_seed_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_seed_list_drops_blank_entries() {
        assert!(split_seed_list("").is_empty());
        assert!(split_seed_list(" , ,").is_empty());

        let seeds = split_seed_list("10.0.0.1:7946, 10.0.0.2:7946,,");
        assert_eq!(seeds, vec!["10.0.0.1:7946", "10.0.0.2:7946"]);
    }

    #[test]
    fn test_parse_flags() {
        let config = NodeConfig::try_parse_from([
            "crdt-server",
            "--agent-addr",
            "127.0.0.1:7946",
            "--cluster-addrs",
            "127.0.0.1:7947,127.0.0.1:7948",
            "--listen",
            "127.0.0.1:9000",
            "--peer-log-interval-secs",
            "3",
        ])
        .expect("flags should parse");

        assert_eq!(config.agent_addr, "127.0.0.1:7946");
        assert_eq!(config.seed_addrs().len(), 2);

        let server = config.server_config();
        assert_eq!(server.listen_addr, "127.0.0.1:9000");
        assert_eq!(server.peer_log_interval, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = NodeConfig::try_parse_from([
            "crdt-server",
            "--agent-addr",
            "127.0.0.1:7946",
            "--peer-log-interval-secs",
            "0",
        ])
        .expect("flags should parse");

        assert_eq!(config.server_config().peer_log_interval, Duration::from_secs(1));
    }
}
