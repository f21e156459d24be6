use std::fmt;

use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::matchmaking::{DEFAULT_PLAYER_NAME, DEFAULT_PLAYER_RANK};

/// Identity of one live connection. Assigned by the transport when the
/// socket is accepted, never reused, meaningless after the socket closes.
pub type ConnectionId = Uuid;

/// Rank display label: either a named tier or a bare numeric level.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum Rank {
    Label(String),
    Level(u64),
}

impl Rank {
    fn is_blank(&self) -> bool {
        matches!(self, Rank::Label(label) if label.is_empty())
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Label(DEFAULT_PLAYER_RANK.to_string())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Label(label) => f.write_str(label),
            Rank::Level(level) => write!(f, "{}", level),
        }
    }
}

/// A registered player's display profile. Wins and rank are opaque display
/// fields: matchmaking never orders or filters on them.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub name: String,
    pub wins: u32,
    pub rank: Rank,
    pub avatar: String,
}

/// Raw registration payload. Every field is optional; blank strings count
/// as missing.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub wins: Option<u32>,
    pub rank: Option<Rank>,
    pub avatar: Option<String>,
}

impl ProfileInput {
    /// Build the stored profile, defaulting absent or blank fields.
    pub fn into_profile(self) -> PlayerProfile {
        PlayerProfile {
            name: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
            wins: self.wins.unwrap_or(0),
            rank: self.rank.filter(|rank| !rank.is_blank()).unwrap_or_default(),
            avatar: self.avatar.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_accepts_label_or_level() {
        let label: Rank = serde_json::from_str("\"Gold\"").unwrap();
        assert_eq!(label, Rank::Label("Gold".to_string()));
        assert_eq!(label.to_string(), "Gold");

        let level: Rank = serde_json::from_str("7").unwrap();
        assert_eq!(level, Rank::Level(7));
        assert_eq!(level.to_string(), "7");
    }

    #[test]
    fn into_profile_keeps_provided_fields() {
        let input = ProfileInput {
            name: Some("Ann".to_string()),
            wins: Some(3),
            rank: Some(Rank::Label("Gold".to_string())),
            avatar: Some("a.png".to_string()),
        };
        let profile = input.into_profile();
        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.wins, 3);
        assert_eq!(profile.rank, Rank::Label("Gold".to_string()));
        assert_eq!(profile.avatar, "a.png");
    }

    #[test]
    fn into_profile_defaults_absent_fields() {
        let profile = ProfileInput::default().into_profile();
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.wins, 0);
        assert_eq!(profile.rank, Rank::Label("Rookie".to_string()));
        assert_eq!(profile.avatar, "");
    }

    #[test]
    fn into_profile_treats_blank_fields_as_absent() {
        let input = ProfileInput {
            name: Some(String::new()),
            wins: None,
            rank: Some(Rank::Label(String::new())),
            avatar: None,
        };
        let profile = input.into_profile();
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.rank, Rank::Label("Rookie".to_string()));
    }
}
