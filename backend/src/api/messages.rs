use crate::lobby::{LobbyView, Membership, Participant, ParticipantId, Phase};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Accept any JSON value; one of the wrong type (or null) reads as absent.
///
/// A numeric pin or a string player id simply matches nothing, as opposed to
/// failing the whole request.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateLobbyRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JoinLobbyRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub pin: Option<String>,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StartGameRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub pin: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaveLobbyRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub pin: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub player_id: Option<ParticipantId>,
}

#[derive(Debug, Deserialize)]
pub struct LobbyQuery {
    pub pin: Option<String>,
}

/// Public view of a participant; `last_seen` stays server-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerInfo {
    pub id: ParticipantId,
    pub name: String,
    pub is_host: bool,
}

impl From<&Participant> for PlayerInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.display_name.clone(),
            is_host: participant.is_host,
        }
    }
}

fn players(roster: &[Participant]) -> Vec<PlayerInfo> {
    roster.iter().map(PlayerInfo::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyResponse {
    LobbyCreated {
        success: bool,
        pin: String,
        player: PlayerInfo,
        players: Vec<PlayerInfo>,
    },
    CreateFailed {
        success: bool,
        reason: String,
    },
    JoinSuccess {
        success: bool,
        pin: String,
        player: PlayerInfo,
        players: Vec<PlayerInfo>,
    },
    JoinFailed {
        success: bool,
        reason: String,
    },
    LobbyState {
        success: bool,
        pin: String,
        state: Phase,
        countdown_started: bool,
        players: Vec<PlayerInfo>,
    },
    LobbyNotFound {
        success: bool,
    },
    GameStarted {
        success: bool,
    },
}

impl LobbyResponse {
    pub fn created(membership: &Membership) -> Self {
        Self::LobbyCreated {
            success: true,
            pin: membership.code.clone(),
            player: PlayerInfo::from(&membership.participant),
            players: players(&membership.roster),
        }
    }

    pub fn joined(membership: &Membership) -> Self {
        Self::JoinSuccess {
            success: true,
            pin: membership.code.clone(),
            player: PlayerInfo::from(&membership.participant),
            players: players(&membership.roster),
        }
    }

    pub fn state(view: &LobbyView) -> Self {
        Self::LobbyState {
            success: true,
            pin: view.code.clone(),
            state: view.phase,
            countdown_started: view.countdown_started,
            players: players(&view.roster),
        }
    }

    pub fn create_failed(reason: impl Into<String>) -> Self {
        Self::CreateFailed {
            success: false,
            reason: reason.into(),
        }
    }

    pub fn join_failed(reason: impl Into<String>) -> Self {
        Self::JoinFailed {
            success: false,
            reason: reason.into(),
        }
    }
}

/// Bare outcome flag used by start (on failure) and leave
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ack {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
