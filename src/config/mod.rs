//! Main configuration module.
//!
//! Re-exports submodules for server, matchmaking and anti-spam settings.

pub mod anti_spam;
pub mod matchmaking;
pub mod server;
