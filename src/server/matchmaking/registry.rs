use std::collections::HashMap;

use log::info;

use super::types::{ConnectionId, PlayerProfile, ProfileInput};

/// Profiles attached to live connections.
///
/// A connection may register at any time, including while already waiting
/// for a match; re-registering overwrites the previous profile. Entries are
/// removed when the connection closes.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    profiles: HashMap<ConnectionId, PlayerProfile>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the profile for `conn_id`, filling absent fields with defaults.
    pub fn register(&mut self, conn_id: ConnectionId, input: ProfileInput) {
        let profile = input.into_profile();
        info!(
            "[Registry] {} registered as '{}' ({} wins, rank {})",
            conn_id, profile.name, profile.wins, profile.rank
        );
        self.profiles.insert(conn_id, profile);
    }

    pub fn lookup(&self, conn_id: &ConnectionId) -> Option<&PlayerProfile> {
        self.profiles.get(conn_id)
    }

    pub fn remove(&mut self, conn_id: &ConnectionId) -> Option<PlayerProfile> {
        self.profiles.remove(conn_id)
    }
}
