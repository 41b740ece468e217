use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::membership::manager::MembershipManager;

pub const DEFAULT_PEER_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Logs one line per known peer on every tick.
///
/// Runs until its cancellation token fires; the server cancels it when it stops serving.
pub struct PeerMonitor {
    membership: Arc<MembershipManager>,
    interval: Duration,
}

impl PeerMonitor {
    pub fn new(membership: Arc<MembershipManager>, interval: Duration) -> Self {
        Self {
            membership,
            interval,
        }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(shutdown).await;
        })
    }

    async fn run(&self, shutdown: CancellationToken) {
        let start = tokio::time::Instant::now() + self.interval;
        let mut interval = tokio::time::interval_at(start, self.interval);

        tracing::debug!("Peer monitor started (every {:?})", self.interval);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            self.report().await;
        }

        tracing::debug!("Peer monitor stopped");
    }

    /// Logs the current peers and returns how many there were.
    pub async fn report(&self) -> usize {
        let peers = self.membership.peers().await;

        for member in &peers {
            tracing::info!(
                "member: {} addr={} status={}",
                member.name,
                member.addr,
                member.status
            );
        }

        peers.len()
    }
}
