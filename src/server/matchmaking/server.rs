//! Matchmaking server actor.
//!
//! Owns every piece of matchmaking state: the live session table, the player
//! registry, the per-topic waiting pools and the scheduled quiz starts.
//! Sessions only talk to it through messages, so all mutations run serialized
//! in the actor mailbox.

use actix::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;
use log::{debug, info, warn};

use super::messages::{OpponentProfile, ServerWsMessage};
use super::pools::WaitingPools;
use super::registry::PlayerRegistry;
use super::types::{ConnectionId, ProfileInput};
use crate::config::matchmaking::{MATCH_START_DELAY_SECS, WAITING_STATUS};

type SessionAddr = Recipient<ServerWsMessage>;

/// A matched pair whose `quiz-starting` has not fired yet.
struct PendingStart {
    players: [ConnectionId; 2],
    handle: SpawnHandle,
}

/// Main matchmaking server actor.
pub struct MatchmakingServer {
    /// Live sessions, keyed by connection id.
    sessions: HashMap<ConnectionId, SessionAddr>,
    /// Profiles registered by live connections.
    registry: PlayerRegistry,
    /// Per-topic waiting queues.
    pools: WaitingPools,
    /// Scheduled quiz starts, keyed by match id.
    pending_starts: HashMap<Uuid, PendingStart>,
    /// Delay between `opponent_found` and `quiz-starting`.
    start_delay: Duration,
}

impl MatchmakingServer {
    /// Create a new matchmaking server.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            registry: PlayerRegistry::new(),
            pools: WaitingPools::new(),
            pending_starts: HashMap::new(),
            start_delay: Duration::from_secs(MATCH_START_DELAY_SECS),
        }
    }

    /// Build a server with a shorter countdown so tests do not sleep for real.
    #[cfg(test)]
    pub fn with_start_delay(start_delay: Duration) -> Self {
        Self {
            start_delay,
            ..Self::new()
        }
    }

    /// Push a message to one session, if it is still connected.
    fn send_to(&self, conn_id: &ConnectionId, msg: ServerWsMessage) {
        match self.sessions.get(conn_id) {
            Some(addr) => addr.do_send(msg),
            None => debug!(
                "[Matchmaking] Dropped message for closed session {}",
                conn_id
            ),
        }
    }

    /// Pair the two longest-waiting members of `topic`.
    ///
    /// Entries whose profile is missing (the connection closed mid-match or
    /// never registered) are evicted without notice; the survivor keeps its
    /// place at the front of the queue and the loop retries with the next
    /// candidates.
    fn try_pair(&mut self, topic: &str, ctx: &mut Context<Self>) {
        while let Some((first, second)) = self.pools.dequeue_pair(topic) {
            let first_profile = self.registry.lookup(&first).cloned();
            let second_profile = self.registry.lookup(&second).cloned();
            match (first_profile, second_profile) {
                (Some(first_profile), Some(second_profile)) => {
                    self.send_to(
                        &first,
                        ServerWsMessage::OpponentFound(OpponentProfile::from(&second_profile)),
                    );
                    self.send_to(
                        &second,
                        ServerWsMessage::OpponentFound(OpponentProfile::from(&first_profile)),
                    );
                    let match_id = self.schedule_quiz_start(first, second, ctx);
                    info!(
                        "[Matchmaking] Matched '{}' vs '{}' on topic '{}', match_id={}",
                        first_profile.name, second_profile.name, topic, match_id
                    );
                    return;
                }
                (Some(_), None) => {
                    warn!(
                        "[Matchmaking] Evicted stale entry {} from topic '{}'",
                        second, topic
                    );
                    self.pools.requeue_front(topic, first);
                }
                (None, Some(_)) => {
                    warn!(
                        "[Matchmaking] Evicted stale entry {} from topic '{}'",
                        first, topic
                    );
                    self.pools.requeue_front(topic, second);
                }
                (None, None) => {
                    warn!(
                        "[Matchmaking] Evicted stale entries {} and {} from topic '{}'",
                        first, second, topic
                    );
                }
            }
        }
    }

    /// Schedule the `quiz-starting` notification for a freshly formed pair.
    fn schedule_quiz_start(
        &mut self,
        first: ConnectionId,
        second: ConnectionId,
        ctx: &mut Context<Self>,
    ) -> Uuid {
        let match_id = Uuid::new_v4();
        let handle = ctx.run_later(self.start_delay, move |act, _ctx| {
            act.fire_quiz_start(match_id);
        });
        self.pending_starts.insert(
            match_id,
            PendingStart {
                players: [first, second],
                handle,
            },
        );
        match_id
    }

    /// Notify both players of a pending match that their quiz begins now.
    fn fire_quiz_start(&mut self, match_id: Uuid) {
        if let Some(start) = self.pending_starts.remove(&match_id) {
            for conn_id in &start.players {
                self.send_to(conn_id, ServerWsMessage::QuizStarting);
            }
            info!("[Matchmaking] Quiz starting, match_id={}", match_id);
        }
    }

    /// Cancel every scheduled start that involves `conn_id`.
    fn cancel_pending_starts_for(&mut self, conn_id: &ConnectionId, ctx: &mut Context<Self>) {
        let cancelled: Vec<Uuid> = self
            .pending_starts
            .iter()
            .filter(|(_, start)| start.players.contains(conn_id))
            .map(|(match_id, _)| *match_id)
            .collect();
        for match_id in cancelled {
            if let Some(start) = self.pending_starts.remove(&match_id) {
                ctx.cancel_future(start.handle);
                info!(
                    "[Matchmaking] Cancelled match_id={} after {} disconnected",
                    match_id, conn_id
                );
            }
        }
    }
}

/// Message: the transport accepted a new WebSocket connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: ConnectionId,
    pub addr: SessionAddr,
}

/// Message: a connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: ConnectionId,
}

/// Message: a client attached a display profile to its connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterPlayer {
    pub conn_id: ConnectionId,
    pub input: ProfileInput,
}

/// Message: a client asked to be matched on a topic.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinQuiz {
    pub conn_id: ConnectionId,
    pub topic: String,
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.insert(msg.conn_id, msg.addr);
        info!(
            "[Matchmaking] Session {} connected ({} online)",
            msg.conn_id,
            self.sessions.len()
        );
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    /// Removes every trace of the connection: session entry, queue slot,
    /// registered profile and any scheduled quiz start involving it.
    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.conn_id);
        if let Some(topic) = self.pools.leave(&msg.conn_id) {
            info!(
                "[Matchmaking] {} left the '{}' queue on disconnect",
                msg.conn_id, topic
            );
        }
        if let Some(profile) = self.registry.remove(&msg.conn_id) {
            info!(
                "[Matchmaking] Purged profile '{}' of {}",
                profile.name, msg.conn_id
            );
        }
        self.cancel_pending_starts_for(&msg.conn_id, ctx);
    }
}

impl Handler<RegisterPlayer> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: RegisterPlayer, _ctx: &mut Self::Context) -> Self::Result {
        self.registry.register(msg.conn_id, msg.input);
    }
}

impl Handler<JoinQuiz> for MatchmakingServer {
    type Result = ();

    /// Handles a join: queue the connection, then either tell it to keep
    /// waiting or pair it with the longest-waiting opponent.
    fn handle(&mut self, msg: JoinQuiz, ctx: &mut Self::Context) -> Self::Result {
        if self.pools.enqueue(&msg.topic, msg.conn_id) {
            debug!(
                "[Matchmaking] {} queued for topic '{}'",
                msg.conn_id, msg.topic
            );
        } else {
            debug!(
                "[Matchmaking] {} re-joined topic '{}' while already queued",
                msg.conn_id, msg.topic
            );
        }
        if self.pools.len(&msg.topic) < 2 {
            self.send_to(
                &msg.conn_id,
                ServerWsMessage::Waiting {
                    status: WAITING_STATUS.to_string(),
                },
            );
            return;
        }
        self.try_pair(&msg.topic, ctx);
    }
}
