use super::error::LobbyError;
use super::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

pub const MAX_PARTICIPANTS: usize = 12;

/// Lobby phase. Only ever moves from `Waiting` to `Started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "lobby")]
    Waiting,
    #[serde(rename = "started")]
    Started,
}

/// A bounded group of participants waiting for a game to begin.
///
/// The roster is kept in join order. Whenever it is non-empty exactly one
/// participant is host; removing the host hands the role to `roster[0]`.
#[derive(Debug, Clone)]
pub struct Lobby {
    pub code: String,
    pub capacity: usize,
    pub created_at: Instant,
    roster: Vec<Participant>,
    phase: Phase,
    countdown_started: bool,
}

/// Read-only projection of a lobby handed to pollers
#[derive(Debug, Clone, PartialEq)]
pub struct LobbyView {
    pub code: String,
    pub phase: Phase,
    pub countdown_started: bool,
    pub roster: Vec<Participant>,
}

/// What happened when a participant left
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub participant: Participant,
    pub new_host: Option<ParticipantId>,
    pub lobby_closed: bool,
}

impl Lobby {
    pub fn new(code: impl Into<String>, host: Participant, created_at: Instant) -> Self {
        Self {
            code: code.into(),
            capacity: MAX_PARTICIPANTS,
            created_at,
            roster: vec![Participant { is_host: true, ..host }],
            phase: Phase::Waiting,
            countdown_started: false,
        }
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn countdown_started(&self) -> bool {
        self.countdown_started
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.capacity
    }

    pub fn has_participant(&self, id: ParticipantId) -> bool {
        self.roster.iter().any(|p| p.id == id)
    }

    pub fn host(&self) -> Option<&Participant> {
        self.roster.iter().find(|p| p.is_host)
    }

    /// Append a non-host participant at the end of the roster.
    pub fn admit(&mut self, participant: Participant) -> Result<&Participant, LobbyError> {
        if self.is_full() {
            return Err(LobbyError::LobbyFull(self.code.clone()));
        }
        self.roster.push(Participant {
            is_host: false,
            ..participant
        });
        Ok(&self.roster[self.roster.len() - 1])
    }

    /// Remove a participant, handing the host role to the oldest survivor
    /// if the host left.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Departure, LobbyError> {
        let index = self
            .roster
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LobbyError::ParticipantNotFound {
                code: self.code.clone(),
                participant_id: id,
            })?;

        let participant = self.roster.remove(index);

        let mut new_host = None;
        if participant.is_host
            && let Some(oldest) = self.roster.first_mut()
        {
            oldest.is_host = true;
            new_host = Some(oldest.id);
        }

        Ok(Departure {
            participant,
            new_host,
            lobby_closed: self.roster.is_empty(),
        })
    }

    /// Idempotent: starting an already started lobby changes nothing.
    pub fn start(&mut self) {
        self.phase = Phase::Started;
        self.countdown_started = true;
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }

    pub fn view(&self) -> LobbyView {
        LobbyView {
            code: self.code.clone(),
            phase: self.phase,
            countdown_started: self.countdown_started,
            roster: self.roster.clone(),
        }
    }
}
