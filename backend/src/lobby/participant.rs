use tokio::time::Instant;

/// Six-digit numeric participant identifier.
pub type ParticipantId = u32;

/// One member of a lobby roster
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub is_host: bool,
    /// Internal bookkeeping, never exposed to clients
    pub last_seen: Instant,
}

impl Participant {
    pub fn host(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, true)
    }

    pub fn guest(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, false)
    }

    fn new(id: ParticipantId, display_name: impl Into<String>, is_host: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_host,
            last_seen: Instant::now(),
        }
    }
}
