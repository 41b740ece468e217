//! Set Server
//!
//! The composition of one node: RPC routes for the set service and the peer listing, plus
//! the peer monitor. The server owns a cancellation token; cancelling it drains the HTTP
//! server and stops the monitor.
//!
//! Every failure is returned to the caller. Deciding to exit the process is left to the binary.

use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::monitor::{DEFAULT_PEER_LOG_INTERVAL, PeerMonitor};
use crate::error::ServerError;
use crate::membership::handlers::handle_peers;
use crate::membership::manager::MembershipManager;
use crate::set::backend::SetBackend;
use crate::set::handlers::{handle_add, handle_contains, handle_remove};
use crate::set::protocol::{ENDPOINT_ADD, ENDPOINT_CONTAINS, ENDPOINT_PEERS, ENDPOINT_REMOVE};
use crate::set::service::SetService;

/// Listen address used when none is configured. A leading `:` means all interfaces.
pub const DEFAULT_LISTEN_ADDR: &str = ":8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub peer_log_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            peer_log_interval: DEFAULT_PEER_LOG_INTERVAL,
        }
    }
}

pub struct SetServer {
    config: ServerConfig,
    service: Arc<SetService>,
    membership: Arc<MembershipManager>,
    shutdown: CancellationToken,
}

impl SetServer {
    /// The backend is fixed for the lifetime of the server.
    pub fn new(
        config: ServerConfig,
        backend: Arc<dyn SetBackend>,
        membership: Arc<MembershipManager>,
    ) -> Self {
        Self {
            config,
            service: SetService::new(backend),
            membership,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token whose cancellation stops [`serve`](Self::serve).
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(ENDPOINT_ADD, post(handle_add))
            .route(ENDPOINT_REMOVE, post(handle_remove))
            .route(ENDPOINT_CONTAINS, post(handle_contains))
            .route(ENDPOINT_PEERS, get(handle_peers))
            .layer(Extension(self.service.clone()))
            .layer(Extension(self.membership.clone()))
    }

    /// Resolves the configured listen address and binds it.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = resolve_listen_addr(&self.config.listen_addr).await?;

        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serves RPC calls on `listener` until the transport fails or the server is shut down.
    ///
    /// The peer monitor runs for exactly as long as this call.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;

        let monitor_token = self.shutdown.child_token();
        let monitor = PeerMonitor::new(self.membership.clone(), self.config.peer_log_interval)
            .spawn(monitor_token.clone());

        info!("Set server listening on {}", local_addr);

        let shutdown = self.shutdown.clone();
        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;

        monitor_token.cancel();
        if let Err(e) = monitor.await {
            tracing::warn!("Peer monitor ended abnormally: {}", e);
        }

        info!("Set server on {} stopped", local_addr);

        served.map_err(ServerError::Serve)
    }

    pub async fn listen_and_serve(&self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }
}

/// Turns a configured listen address into a socket address.
///
/// Empty means [`DEFAULT_LISTEN_ADDR`]; `:port` binds all IPv4 interfaces.
pub async fn resolve_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let addr = if addr.is_empty() {
        DEFAULT_LISTEN_ADDR
    } else {
        addr
    };

    let normalized = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    let mut candidates = tokio::net::lookup_host(normalized.as_str())
        .await
        .map_err(|e| ServerError::Resolve {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

    candidates.next().ok_or_else(|| ServerError::Resolve {
        addr: addr.to_string(),
        reason: "no addresses".to_string(),
    })
}
