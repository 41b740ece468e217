use clap::Parser;
use crdt_server::config::NodeConfig;
use crdt_server::membership::manager::MembershipManager;
use crdt_server::server::lifecycle::SetServer;
use crdt_server::server::shutdown::shutdown_signal;
use crdt_server::set::backend::MemorySet;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::parse();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seeds = config.seed_addrs();
    if seeds.is_empty() {
        tracing::info!("Starting as seed node (founder)");
    } else {
        tracing::info!("Seed nodes: {:?}", seeds);
    }

    // 1. Membership (UDP gossip):
    let membership = MembershipManager::new();
    if let Err(e) = membership.register_self(&seeds, &config.agent_addr).await {
        tracing::error!("cannot register with cluster: {}", e);
        std::process::exit(1);
    }

    if let Some(me) = membership.local_member().await {
        tracing::info!("Node name: {} (gossip={})", me.name, me.addr);
    }

    // 2. Set service over RPC:
    let server = SetServer::new(
        config.server_config(),
        Arc::new(MemorySet::new()),
        membership.clone(),
    );

    // 3. Stop serving on Ctrl+C / SIGTERM:
    let shutdown = server.shutdown_token();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.cancel();
    });

    tracing::info!("running server...");
    let served = server.listen_and_serve().await;

    // 4. Leave the cluster whatever the outcome:
    if let Err(e) = membership.deregister_self().await {
        tracing::warn!("cannot deregister from cluster: {}", e);
    }

    if let Err(e) = served {
        tracing::error!("cannot start server: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
