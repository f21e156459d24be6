//! Matchmaking module: pairs connected players per quiz topic and schedules
//! quiz starts.

pub mod messages;
pub mod pools;
pub mod registry;
pub mod server;
pub mod session;
pub mod types;
