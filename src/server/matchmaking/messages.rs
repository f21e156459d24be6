use actix::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{PlayerProfile, ProfileInput, Rank};

/// Messages a client can send over the matchmaking WebSocket.
///
/// The wire format is a JSON object with an `action` tag and an optional
/// `data` payload, e.g. `{"action":"join-quiz","data":"history"}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    /// Attach a display profile to this connection.
    #[serde(rename = "register-player")]
    RegisterPlayer(ProfileInput),
    /// Enter the waiting pool for a quiz topic.
    #[serde(rename = "join-quiz")]
    JoinQuiz(String),
    /// Application-level keepalive.
    #[serde(rename = "ping")]
    Ping,
}

/// Profile of the matched opponent, as sent to the other side of a pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpponentProfile {
    pub opponent_name: String,
    pub opponent_wins: u32,
    pub opponent_rank: Rank,
    pub opponent_avatar: String,
}

impl From<&PlayerProfile> for OpponentProfile {
    fn from(profile: &PlayerProfile) -> Self {
        OpponentProfile {
            opponent_name: profile.name.clone(),
            opponent_wins: profile.wins,
            opponent_rank: profile.rank.clone(),
            opponent_avatar: profile.avatar.clone(),
        }
    }
}

/// Messages the server pushes to a matchmaking session.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    /// The player is alone in the pool for their topic.
    #[serde(rename = "waiting")]
    Waiting { status: String },
    /// A pair was formed; carries the other player's profile.
    #[serde(rename = "opponent_found")]
    OpponentFound(OpponentProfile),
    /// The countdown elapsed and the quiz begins now.
    #[serde(rename = "quiz-starting")]
    QuizStarting,
}
