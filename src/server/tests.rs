//! Server Module Tests
//!
//! ## Test Scopes
//! - **Address Resolution**: Defaults and `:port` shorthand.
//! - **Lifecycle**: Bind failures are returned, shutdown stops serving.
//! - **Peer Monitor**: Reports and stops when cancelled.

#[cfg(test)]
mod tests {
    use crate::error::ServerError;
    use crate::membership::manager::MembershipManager;
    use crate::server::lifecycle::{ServerConfig, SetServer, resolve_listen_addr};
    use crate::server::monitor::PeerMonitor;
    use crate::set::backend::MemorySet;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn test_server(listen_addr: &str) -> Arc<SetServer> {
        let config = ServerConfig {
            listen_addr: listen_addr.to_string(),
            peer_log_interval: Duration::from_millis(50),
        };
        Arc::new(SetServer::new(
            config,
            Arc::new(MemorySet::new()),
            MembershipManager::new(),
        ))
    }

    // ============================================================
    // ADDRESS RESOLUTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_empty_listen_addr_defaults_to_8080() {
        let addr = resolve_listen_addr("").await.unwrap();
        assert_eq!(addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_port_only_listen_addr_binds_all_interfaces() {
        let addr = resolve_listen_addr(":9090").await.unwrap();
        assert_eq!(addr, "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_explicit_listen_addr() {
        let addr = resolve_listen_addr("127.0.0.1:7000").await.unwrap();
        assert_eq!(addr, "127.0.0.1:7000".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_malformed_listen_addr() {
        let result = resolve_listen_addr("no-port-here").await;
        assert!(matches!(result, Err(ServerError::Resolve { .. })));
    }

    // ============================================================
    // LIFECYCLE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_bind_failure_is_returned() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken_addr = taken.local_addr().unwrap();

        let server = test_server(&taken_addr.to_string());

        let result = server.listen_and_serve().await;
        match result {
            Err(ServerError::Bind { addr, .. }) => assert_eq!(addr, taken_addr),
            other => panic!("expected bind error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shutdown_stops_serving() {
        let server = test_server("127.0.0.1:0");
        let listener = server.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();

        let serving = {
            let server = server.clone();
            tokio::spawn(async move { server.serve(listener).await })
        };

        // The port answers while serving
        assert!(tokio::net::TcpStream::connect(addr).await.is_ok());

        server.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), serving)
            .await
            .expect("server should stop after shutdown")
            .unwrap();
        assert!(result.is_ok());
    }

    // ============================================================
    // PEER MONITOR TESTS
    // ============================================================

    #[tokio::test]
    async fn test_monitor_reports_nothing_when_unregistered() {
        let monitor = PeerMonitor::new(MembershipManager::new(), Duration::from_millis(10));
        assert_eq!(monitor.report().await, 0);
    }

    #[tokio::test]
    async fn test_monitor_stops_when_cancelled() {
        let token = CancellationToken::new();
        let handle = PeerMonitor::new(MembershipManager::new(), Duration::from_millis(10))
            .spawn(token.clone());

        // Let it tick a few times
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor should stop once cancelled")
            .unwrap();
    }
}
