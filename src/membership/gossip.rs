use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use rand::seq::IteratorRandom;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::agent::{AgentConfig, GossipAgent, GossipTiming};
use super::types::{GossipMessage, MemberRecord, MemberStatus, NodeName};

const MAX_DATAGRAM: usize = 65536;

/// Upper bound of members carried by one `Ack` or `JoinAck` datagram.
pub const MEMBERS_PER_DATAGRAM: usize = 64;

/// Other members piggybacked on an `Ack`, besides the sender itself.
const ACK_SAMPLE_SIZE: usize = 16;

/// Requesters waiting for a suspect to answer a ping sent on their behalf.
struct Relay {
    requesters: Vec<SocketAddr>,
    since: Instant,
}

/// Gossip agent speaking a SWIM-style protocol over a single UDP socket.
///
/// Every agent keeps a full member list (itself included). Liveness is checked by pinging
/// a random peer each gossip round; acks carry a sample of the responder's member list, so
/// the views converge without a coordinator. Conflicting views of a member are ordered by
/// the member's incarnation number.
///
/// A member silent for `failure_timeout` is suspected: it is pinged directly and through
/// `indirect_probes` other members. Only a suspect that stays silent for `suspicion_timeout`
/// is declared failed. Left and failed members are forgotten after `reap_timeout`.
pub struct UdpGossipAgent {
    local_name: NodeName,
    local_addr: SocketAddr,
    members: DashMap<NodeName, MemberRecord>,
    socket: UdpSocket,
    incarnation: AtomicU64,
    timing: GossipTiming,
    pending_joins: DashMap<SocketAddr, oneshot::Sender<()>>,
    suspects: DashMap<NodeName, Instant>,
    tombstones: DashMap<NodeName, Instant>,
    relays: DashMap<NodeName, Relay>,
    shutdown: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl UdpGossipAgent {
    /// Binds the socket and starts the background loops. Does not contact anyone.
    pub async fn create(config: AgentConfig, timing: GossipTiming) -> Result<Arc<Self>> {
        let socket = UdpSocket::bind(config.bind_addr).await?;
        let local_addr = SocketAddr::new(config.bind_addr.ip(), socket.local_addr()?.port());

        if local_addr.ip().is_unspecified() {
            tracing::warn!(
                "Advertising unspecified address {}; peers will not be able to reach this node",
                local_addr
            );
        }

        let local = MemberRecord {
            name: config.node_name.clone(),
            addr: local_addr,
            status: MemberStatus::Alive,
            incarnation: 1,
            last_seen: Some(Instant::now()),
        };

        let members = DashMap::new();
        members.insert(local.name.clone(), local);

        let agent = Arc::new(Self {
            local_name: config.node_name,
            local_addr,
            members,
            socket,
            incarnation: AtomicU64::new(1),
            timing,
            pending_joins: DashMap::new(),
            suspects: DashMap::new(),
            tombstones: DashMap::new(),
            relays: DashMap::new(),
            shutdown: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        });

        agent.start();
        info!("Gossip agent {} listening on {}", agent.local_name, agent.local_addr);

        Ok(agent)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn start(self: &Arc<Self>) {
        let gossip_handle = {
            let agent = self.clone();
            tokio::spawn(async move {
                agent.gossip_loop().await;
            })
        };

        let receive_handle = {
            let agent = self.clone();
            tokio::spawn(async move {
                agent.receive_loop().await;
            })
        };

        let failure_detection_handle = {
            let agent = self.clone();
            tokio::spawn(async move {
                agent.failure_detection_loop().await;
            })
        };

        let mut tasks = match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tasks.extend([gossip_handle, receive_handle, failure_detection_handle]);
    }

    fn local_record(&self) -> MemberRecord {
        match self.members.get(&self.local_name) {
            Some(entry) => entry.value().clone(),
            None => MemberRecord {
                name: self.local_name.clone(),
                addr: self.local_addr,
                status: MemberStatus::Alive,
                incarnation: self.incarnation.load(Ordering::SeqCst),
                last_seen: Some(Instant::now()),
            },
        }
    }

    fn set_local_status(&self, status: MemberStatus) {
        if let Some(mut local) = self.members.get_mut(&self.local_name) {
            local.status = status;
            local.incarnation = self.incarnation.load(Ordering::SeqCst);
        }
    }

    fn snapshot(&self) -> Vec<MemberRecord> {
        self.members
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// The local record plus a random sample of the other members.
    fn gossip_sample(&self) -> Vec<MemberRecord> {
        let mut sample = self
            .members
            .iter()
            .filter(|entry| entry.key() != &self.local_name)
            .map(|entry| entry.value().clone())
            .choose_multiple(&mut rand::thread_rng(), ACK_SAMPLE_SIZE);

        sample.push(self.local_record());
        sample
    }

    async fn send(&self, msg: &GossipMessage, addr: SocketAddr) -> Result<()> {
        let encoded = bincode::serialize(msg)?;
        self.socket.send_to(&encoded, addr).await?;
        Ok(())
    }

    async fn resolve(&self, seed: &str) -> Result<SocketAddr> {
        let mut candidates = tokio::net::lookup_host(seed).await?;
        candidates
            .find(|addr| addr.is_ipv4() == self.local_addr.is_ipv4())
            .ok_or_else(|| anyhow::anyhow!("no usable address for {}", seed))
    }

    async fn gossip_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.timing.gossip_interval);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            // Failed members are probed too, so a healed partition can be noticed.
            let targets: Vec<MemberRecord> = self
                .members
                .iter()
                .filter(|entry| {
                    entry.key() != &self.local_name
                        && matches!(
                            entry.value().status,
                            MemberStatus::Alive | MemberStatus::Failed
                        )
                })
                .map(|entry| entry.value().clone())
                .collect();

            if targets.is_empty() {
                continue;
            }

            use rand::Rng;
            let idx = rand::thread_rng().gen_range(0..targets.len());
            let target = &targets[idx];

            let msg = GossipMessage::Ping {
                from: self.local_name.clone(),
                incarnation: self.incarnation.load(Ordering::SeqCst),
            };

            if let Err(e) = self.send(&msg, target.addr).await {
                tracing::warn!("Failed to send ping to {}: {}", target.name, e);
            } else {
                tracing::trace!("Sent ping to {}", target.name);
            }
        }

        tracing::debug!("Gossip loop of {} stopped", self.local_name);
    }

    async fn receive_loop(self: Arc<Self>) {
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            let received = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut buf) => received,
            };

            match received {
                Ok((len, src)) => match bincode::deserialize::<GossipMessage>(&buf[..len]) {
                    Ok(msg) => {
                        if let Err(e) = self.handle_message(msg, src).await {
                            tracing::error!("Error handling message from {}: {}", src, e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to deserialize message from {}: {}", src, e);
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to receive UDP packet: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }

        tracing::debug!("Receive loop of {} stopped", self.local_name);
    }

    async fn handle_message(&self, msg: GossipMessage, src: SocketAddr) -> Result<()> {
        match msg {
            GossipMessage::Ping { from, incarnation } => {
                self.handle_ping(from, incarnation, src).await?;
            }

            GossipMessage::Ack {
                from,
                incarnation,
                members,
            } => {
                self.handle_ack(from, incarnation, members).await;
            }

            GossipMessage::PingReq {
                from,
                target,
                target_addr,
            } => {
                self.handle_ping_req(from, target, target_addr, src).await?;
            }

            GossipMessage::IndirectAck { target } => {
                self.handle_indirect_ack(target);
            }

            GossipMessage::Join { member } => {
                self.handle_join(member, src).await?;
            }

            GossipMessage::JoinAck { from, members } => {
                self.handle_join_ack(from, members, src).await;
            }

            GossipMessage::Leave { name, incarnation } => {
                self.handle_leave(name, incarnation);
            }

            GossipMessage::Failed { name, incarnation } => {
                self.handle_failed(name, incarnation).await;
            }

            GossipMessage::Alive { name, incarnation } => {
                self.handle_alive(name, incarnation);
            }
        }

        Ok(())
    }

    async fn handle_ping(&self, from: NodeName, incarnation: u64, src: SocketAddr) -> Result<()> {
        tracing::trace!("Received ping from {}", from);

        let mut reported_failed = None;
        if let Some(mut member) = self.members.get_mut(&from) {
            member.last_seen = Some(Instant::now());
            if member.status == MemberStatus::Failed {
                if incarnation > member.incarnation {
                    info!("Node {} at {} is alive again (inc={})", from, src, incarnation);
                    member.status = MemberStatus::Alive;
                    member.incarnation = incarnation;
                } else {
                    reported_failed = Some(member.incarnation);
                }
            }
        } else {
            info!("Discovered new member via ping: {} at {}", from, src);

            self.members.insert(
                from.clone(),
                MemberRecord {
                    name: from.clone(),
                    addr: src,
                    status: MemberStatus::Alive,
                    incarnation,
                    last_seen: Some(Instant::now()),
                },
            );
        }

        let reply = GossipMessage::Ack {
            from: self.local_name.clone(),
            incarnation: self.incarnation.load(Ordering::SeqCst),
            members: self.gossip_sample(),
        };
        self.send(&reply, src).await?;

        // Lets a member we hold as failed refute it.
        if let Some(incarnation) = reported_failed {
            let notice = GossipMessage::Failed {
                name: from,
                incarnation,
            };
            self.send(&notice, src).await?;
        }

        Ok(())
    }

    async fn handle_ack(&self, from: NodeName, incarnation: u64, members: Vec<MemberRecord>) {
        tracing::trace!(
            "Received ack from {} (inc={}) with {} members",
            from,
            incarnation,
            members.len()
        );

        if let Some(mut member) = self.members.get_mut(&from) {
            member.last_seen = Some(Instant::now());
        }

        if let Some((_, relay)) = self.relays.remove(&from) {
            let notice = GossipMessage::IndirectAck {
                target: from.clone(),
            };
            for requester in relay.requesters {
                if let Err(e) = self.send(&notice, requester).await {
                    tracing::warn!("Failed to relay ack of {} to {}: {}", from, requester, e);
                }
            }
        }

        for member in members {
            self.merge_member(member).await;
        }
    }

    /// Pings `target` on behalf of `src`; the answer is relayed back as an `IndirectAck`.
    async fn handle_ping_req(
        &self,
        from: NodeName,
        target: NodeName,
        target_addr: SocketAddr,
        src: SocketAddr,
    ) -> Result<()> {
        tracing::debug!("Probing {} on behalf of {}", target, from);

        {
            let mut relay = self.relays.entry(target).or_insert_with(|| Relay {
                requesters: Vec::new(),
                since: Instant::now(),
            });
            if !relay.requesters.contains(&src) {
                relay.requesters.push(src);
            }
        }

        let ping = GossipMessage::Ping {
            from: self.local_name.clone(),
            incarnation: self.incarnation.load(Ordering::SeqCst),
        };
        self.send(&ping, target_addr).await
    }

    fn handle_indirect_ack(&self, target: NodeName) {
        if let Some(mut member) = self.members.get_mut(&target) {
            tracing::debug!("{} answered an indirect probe", target);
            member.last_seen = Some(Instant::now());
        }
    }

    async fn handle_join(&self, mut member: MemberRecord, src: SocketAddr) -> Result<()> {
        if member.name != self.local_name {
            info!("Node {} joining cluster at {}", member.name, member.addr);

            member.last_seen = Some(Instant::now());
            self.members.insert(member.name.clone(), member);

            info!("Cluster size now: {}", self.members.len());
        }

        let state: Vec<MemberRecord> = self
            .members
            .iter()
            .filter(|entry| !entry.value().status.is_tombstone())
            .map(|entry| entry.value().clone())
            .collect();

        for chunk in state.chunks(MEMBERS_PER_DATAGRAM) {
            let reply = GossipMessage::JoinAck {
                from: self.local_name.clone(),
                members: chunk.to_vec(),
            };
            self.send(&reply, src).await?;
        }

        Ok(())
    }

    async fn handle_join_ack(&self, from: NodeName, members: Vec<MemberRecord>, src: SocketAddr) {
        tracing::debug!("Received full state from {} ({} members)", from, members.len());

        for member in members {
            self.merge_member(member).await;
        }

        if let Some(mut member) = self.members.get_mut(&from) {
            member.last_seen = Some(Instant::now());
        }

        if let Some((_, waiter)) = self.pending_joins.remove(&src) {
            let _ = waiter.send(());
        }
    }

    fn handle_leave(&self, name: NodeName, incarnation: u64) {
        if name == self.local_name {
            return;
        }

        if let Some(mut existing) = self.members.get_mut(&name)
            && incarnation >= existing.incarnation
            && existing.status != MemberStatus::Left
        {
            info!("Node {} at {} left the cluster", existing.name, existing.addr);
            existing.status = MemberStatus::Left;
            existing.incarnation = incarnation;
        }
    }

    async fn handle_failed(&self, name: NodeName, incarnation: u64) {
        if name == self.local_name {
            self.refute(incarnation).await;
            return;
        }

        if let Some(mut existing) = self.members.get_mut(&name)
            && incarnation >= existing.incarnation
            && existing.status == MemberStatus::Alive
        {
            info!("Node {} at {} reported failed", existing.name, existing.addr);
            existing.status = MemberStatus::Failed;
            existing.incarnation = incarnation;
        }
    }

    fn handle_alive(&self, name: NodeName, incarnation: u64) {
        match self.members.get_mut(&name) {
            Some(mut existing) => {
                if incarnation > existing.incarnation {
                    if existing.status != MemberStatus::Alive {
                        info!(
                            "Node {} at {} is now alive (inc={})",
                            existing.name,
                            existing.addr,
                            incarnation
                        );
                    }
                    existing.status = MemberStatus::Alive;
                    existing.incarnation = incarnation;
                    existing.last_seen = Some(Instant::now());
                }
            }
            None => {
                tracing::debug!("Alive message for unknown node {}", name);
            }
        }
    }

    async fn merge_member(&self, new_member: MemberRecord) {
        if new_member.name == self.local_name {
            if new_member.status != MemberStatus::Alive {
                self.refute(new_member.incarnation).await;
            }
            return;
        }

        match self.members.get_mut(&new_member.name) {
            Some(mut existing) => {
                if supersedes(&new_member, &existing) {
                    tracing::debug!(
                        "Updating {}: {} (inc {}) -> {} (inc {})",
                        new_member.name,
                        existing.status,
                        existing.incarnation,
                        new_member.status,
                        new_member.incarnation,
                    );

                    if existing.status != new_member.status {
                        info!(
                            "Node {} at {} is now {}",
                            new_member.name, new_member.addr, new_member.status
                        );
                    }

                    existing.status = new_member.status;
                    existing.incarnation = new_member.incarnation;
                    existing.addr = new_member.addr;
                    existing.last_seen = Some(Instant::now());
                }
            }
            None if new_member.status.is_tombstone() => {
                tracing::trace!(
                    "Ignoring unknown {} member {}",
                    new_member.status,
                    new_member.name
                );
            }
            None => {
                info!(
                    "Discovered new member: {} at {} ({})",
                    new_member.name, new_member.addr, new_member.status
                );

                let mut member_with_timestamp = new_member;
                member_with_timestamp.last_seen = Some(Instant::now());

                self.members
                    .insert(member_with_timestamp.name.clone(), member_with_timestamp);
            }
        }
    }

    /// Answers a claim that this node failed by outbidding the claimed incarnation.
    async fn refute(&self, accused_incarnation: u64) {
        let local_status = self.local_record().status;
        if local_status != MemberStatus::Alive {
            return;
        }

        let current = self.incarnation.load(Ordering::SeqCst);
        if accused_incarnation < current {
            return;
        }

        let next = accused_incarnation + 1;
        self.incarnation.store(next, Ordering::SeqCst);
        self.set_local_status(MemberStatus::Alive);

        info!("Refuting failure report for {} (inc={})", self.local_name, next);

        let msg = GossipMessage::Alive {
            name: self.local_name.clone(),
            incarnation: next,
        };
        self.broadcast_message(&msg).await;
    }

    async fn failure_detection_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.timing.failure_detection_interval);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            let now = Instant::now();
            let mut probes = Vec::new();
            let mut messages_to_broadcast = Vec::new();
            let mut expired = Vec::new();

            for mut entry in self.members.iter_mut() {
                let member = entry.value_mut();

                if member.name == self.local_name {
                    continue;
                }

                if member.status != MemberStatus::Alive {
                    self.suspects.remove(&member.name);
                    let since = *self.tombstones.entry(member.name.clone()).or_insert(now);
                    if now.duration_since(since) > self.timing.reap_timeout {
                        expired.push(member.name.clone());
                    }
                    continue;
                }

                self.tombstones.remove(&member.name);

                let last_seen = *member.last_seen.get_or_insert(now);
                let elapsed = now.duration_since(last_seen);

                if elapsed <= self.timing.failure_timeout {
                    self.suspects.remove(&member.name);
                    continue;
                }

                let suspected_since = *self.suspects.entry(member.name.clone()).or_insert(now);

                if now.duration_since(suspected_since) > self.timing.suspicion_timeout {
                    tracing::warn!("Node {} failed (no contact for {:?})", member.name, elapsed);

                    member.status = MemberStatus::Failed;
                    self.suspects.remove(&member.name);

                    messages_to_broadcast.push(GossipMessage::Failed {
                        name: member.name.clone(),
                        incarnation: member.incarnation,
                    });
                } else {
                    if suspected_since == now {
                        tracing::debug!(
                            "Node {} suspected (no contact for {:?})",
                            member.name,
                            elapsed
                        );
                    }
                    probes.push((member.name.clone(), member.addr));
                }
            }

            for name in expired {
                let removed = self
                    .members
                    .remove_if(&name, |_, member| member.status != MemberStatus::Alive);
                if let Some((_, member)) = removed {
                    self.tombstones.remove(&name);
                    info!("Forgot {} member {} at {}", member.status, name, member.addr);
                }
            }

            self.relays
                .retain(|_, relay| now.duration_since(relay.since) <= self.timing.suspicion_timeout);

            for (name, addr) in probes {
                self.probe(&name, addr).await;
            }

            for msg in messages_to_broadcast {
                self.broadcast_message(&msg).await;
            }
        }

        tracing::debug!("Failure detection loop of {} stopped", self.local_name);
    }

    /// Pings a suspect directly and asks a few other alive members to ping it too.
    async fn probe(&self, target: &NodeName, target_addr: SocketAddr) {
        let ping = GossipMessage::Ping {
            from: self.local_name.clone(),
            incarnation: self.incarnation.load(Ordering::SeqCst),
        };
        if let Err(e) = self.send(&ping, target_addr).await {
            tracing::warn!("Failed to probe {}: {}", target, e);
        }

        let helpers: Vec<(NodeName, SocketAddr)> = self
            .members
            .iter()
            .filter(|entry| {
                entry.key() != &self.local_name
                    && entry.key() != target
                    && entry.value().status == MemberStatus::Alive
                    && !self.suspects.contains_key(entry.key())
            })
            .map(|entry| (entry.key().clone(), entry.value().addr))
            .choose_multiple(&mut rand::thread_rng(), self.timing.indirect_probes);

        let request = GossipMessage::PingReq {
            from: self.local_name.clone(),
            target: target.clone(),
            target_addr,
        };
        for (helper, addr) in helpers {
            if let Err(e) = self.send(&request, addr).await {
                tracing::warn!("Failed to ask {} to probe {}: {}", helper, target, e);
            }
        }
    }

    /// Sends `msg` to every member that has not left. Returns `(attempted, delivered)`.
    async fn broadcast_message(&self, msg: &GossipMessage) -> (usize, usize) {
        let targets: Vec<(NodeName, SocketAddr)> = self
            .members
            .iter()
            .filter(|entry| {
                entry.key() != &self.local_name && entry.value().status != MemberStatus::Left
            })
            .map(|entry| (entry.key().clone(), entry.value().addr))
            .collect();

        let mut delivered = 0;
        for (name, addr) in &targets {
            match self.send(msg, *addr).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to broadcast to {}: {}", name, e),
            }
        }

        (targets.len(), delivered)
    }
}

#[async_trait]
impl GossipAgent for UdpGossipAgent {
    fn name(&self) -> &NodeName {
        &self.local_name
    }

    fn advertise_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn join(&self, seeds: &[String]) -> Result<usize> {
        if seeds.is_empty() {
            info!("No seed nodes given, starting a new cluster");
            return Ok(0);
        }

        let mut seen = HashSet::new();
        let mut waiting = Vec::new();
        for seed in seeds {
            match self.resolve(seed).await {
                Ok(addr) if seen.insert(addr) => {
                    let (tx, rx) = oneshot::channel();
                    self.pending_joins.insert(addr, tx);
                    waiting.push((addr, rx));
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Cannot resolve seed {}: {}", seed, e),
            }
        }

        info!("Joining cluster via {} seed node(s)", waiting.len());

        let msg = GossipMessage::Join {
            member: self.local_record(),
        };

        let mut joined = 0;
        for _ in 0..self.timing.join_attempts {
            if waiting.is_empty() {
                break;
            }

            for (addr, _) in &waiting {
                if let Err(e) = self.send(&msg, *addr).await {
                    tracing::warn!("Failed to send join request to {}: {}", addr, e);
                }
            }

            let deadline = tokio::time::Instant::now() + self.timing.join_timeout;
            let mut unanswered = Vec::new();
            for (addr, mut rx) in waiting {
                match tokio::time::timeout_at(deadline, &mut rx).await {
                    Ok(Ok(())) => {
                        info!("Joined cluster via seed {}", addr);
                        joined += 1;
                    }
                    Ok(Err(_)) => {}
                    Err(_) => unanswered.push((addr, rx)),
                }
            }
            waiting = unanswered;
        }

        for (addr, _) in &waiting {
            self.pending_joins.remove(addr);
        }

        if joined == 0 {
            return Err(anyhow::anyhow!(
                "none of the seed nodes answered: {}",
                seeds.join(", ")
            ));
        }

        Ok(joined)
    }

    async fn leave(&self) -> Result<()> {
        self.set_local_status(MemberStatus::Leaving);

        let msg = GossipMessage::Leave {
            name: self.local_name.clone(),
            incarnation: self.incarnation.load(Ordering::SeqCst),
        };
        let (attempted, delivered) = self.broadcast_message(&msg).await;

        self.set_local_status(MemberStatus::Left);

        if attempted > 0 && delivered == 0 {
            return Err(anyhow::anyhow!(
                "leave notice reached none of {} members",
                attempted
            ));
        }

        info!("{} left the cluster ({} members notified)", self.local_name, delivered);
        Ok(())
    }

    async fn shutdown(&self) {
        self.shutdown.cancel();

        let handles = {
            let mut tasks = match self.tasks.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            std::mem::take(&mut *tasks)
        };

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("Gossip task of {} ended abnormally: {}", self.local_name, e);
            }
        }
    }

    fn members(&self) -> Vec<MemberRecord> {
        self.snapshot()
    }
}

/// Whether `candidate` is a newer view of the same member than `existing`.
///
/// Higher incarnation wins; at equal incarnation the more final status wins
/// (alive < leaving < failed < left).
pub fn supersedes(candidate: &MemberRecord, existing: &MemberRecord) -> bool {
    fn rank(status: MemberStatus) -> u8 {
        match status {
            MemberStatus::Alive => 0,
            MemberStatus::Leaving => 1,
            MemberStatus::Failed => 2,
            MemberStatus::Left => 3,
        }
    }

    candidate.incarnation > existing.incarnation
        || (candidate.incarnation == existing.incarnation
            && rank(candidate.status) > rank(existing.status))
}
