//! Matchmaking configuration constants.
//!
//! Parameters of the pairing flow: the delay before a matched quiz starts,
//! the defaults applied to unregistered profile fields, and the status text
//! shown to waiting players.

/// Delay (in seconds) between a successful pairing and the quiz start
/// notification, giving both clients time to render the opponent screen.
pub const MATCH_START_DELAY_SECS: u64 = 2;

/// Status text sent to a player waiting alone in a topic queue.
pub const WAITING_STATUS: &str = "Searching for opponent…";

/// Display name applied when a registration omits one.
pub const DEFAULT_PLAYER_NAME: &str = "Unknown";

/// Rank label applied when a registration omits one.
pub const DEFAULT_PLAYER_RANK: &str = "Rookie";
