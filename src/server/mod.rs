// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Matchmaking logic (player registry, waiting pools, pairing)
//! - Per-session flood control

pub mod anti_spam;
pub mod health;
pub mod matchmaking;
pub mod router;
pub mod state;
pub mod ws_error;
