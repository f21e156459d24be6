use std::time::{Duration, Instant};
use log::warn;

use crate::config::anti_spam::{BAN_DURATION_SECONDS, MAX_REQUESTS_PER_SECOND};
use crate::server::matchmaking::types::ConnectionId;

/// Tracks flood-control state for a single WebSocket session.
pub struct AntiSpamState {
    // Last error code sent (for suppression)
    last_error_code: Option<String>,
    // Timestamp of last counter reset
    last_tick: Instant,
    // Frames received in the current second
    requests_this_tick: u32,
    // Ban state
    banned_until: Option<Instant>,
}

impl AntiSpamState {
    pub fn new() -> Self {
        Self {
            last_error_code: None,
            last_tick: Instant::now(),
            requests_this_tick: 0,
            banned_until: None,
        }
    }

    /// Call for every incoming frame.
    /// Returns true if the session is currently banned.
    pub fn record_request(&mut self, conn_id: &ConnectionId) -> bool {
        self.tick();
        self.requests_this_tick += 1;
        if self.requests_this_tick > MAX_REQUESTS_PER_SECOND {
            self.ban(conn_id, "Too many requests per second");
            return true;
        }
        self.is_banned()
    }

    /// Call when sending an error. Returns true if the error should be sent
    /// (not suppressed as a duplicate of the previous one).
    pub fn should_send_error(&mut self, error_code: &str, conn_id: &ConnectionId) -> bool {
        if let Some(last) = &self.last_error_code {
            if last == error_code {
                warn!(
                    "[AntiSpam] Suppressed duplicate error '{}' for session {}",
                    error_code, conn_id
                );
                return false;
            }
        }
        self.last_error_code = Some(error_code.to_string());
        true
    }

    /// Call when a valid action is performed.
    pub fn reset_on_valid_action(&mut self) {
        self.last_error_code = None;
    }

    /// Returns true if the session is currently banned.
    pub fn is_banned(&self) -> bool {
        if let Some(until) = self.banned_until {
            Instant::now() < until
        } else {
            false
        }
    }

    /// Returns the remaining ban duration in seconds, or 0 if not banned.
    pub fn ban_remaining_secs(&self) -> u64 {
        if let Some(until) = self.banned_until {
            let now = Instant::now();
            if until > now {
                return (until - now).as_secs();
            }
        }
        0
    }

    /// Ban the session for BAN_DURATION_SECONDS.
    fn ban(&mut self, conn_id: &ConnectionId, reason: &str) {
        let until = Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS);
        self.banned_until = Some(until);
        warn!(
            "[AntiSpam] Banned session {} until {:?} for reason: {}",
            conn_id, until, reason
        );
    }

    /// Reset the per-second counter if a new second has started.
    fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= Duration::from_secs(1) {
            self.last_tick = now;
            self.requests_this_tick = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn stays_unbanned_under_the_frame_limit() {
        let mut state = AntiSpamState::new();
        let conn_id = Uuid::new_v4();
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            assert!(!state.record_request(&conn_id));
        }
        assert!(!state.is_banned());
        assert_eq!(state.ban_remaining_secs(), 0);
    }

    #[test]
    fn frame_flood_triggers_a_ban() {
        let mut state = AntiSpamState::new();
        let conn_id = Uuid::new_v4();
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            state.record_request(&conn_id);
        }
        assert!(state.record_request(&conn_id));
        assert!(state.is_banned());
        assert!(state.ban_remaining_secs() > 0);
    }

    #[test]
    fn duplicate_errors_are_suppressed_until_a_valid_action() {
        let mut state = AntiSpamState::new();
        let conn_id = Uuid::new_v4();
        assert!(state.should_send_error("INVALID_MESSAGE", &conn_id));
        assert!(!state.should_send_error("INVALID_MESSAGE", &conn_id));
        state.reset_on_valid_action();
        assert!(state.should_send_error("INVALID_MESSAGE", &conn_id));
    }
}
