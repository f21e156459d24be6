// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the matchmaking server actor address. Used to share state between
//! HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::matchmaking::server::MatchmakingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaking server actor.
    pub matchmaking_addr: Addr<MatchmakingServer>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(matchmaking_addr: Addr<MatchmakingServer>) -> Self {
        AppState { matchmaking_addr }
    }
}
