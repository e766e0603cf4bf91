use super::participant::ParticipantId;

/// Failures produced by lobby registry and lifecycle operations.
///
/// All of these are expected outcomes of normal traffic; none of them is
/// fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    #[error("lobby {0} not found")]
    LobbyNotFound(String),

    #[error("participant {participant_id} not in lobby {code}")]
    ParticipantNotFound {
        code: String,
        participant_id: ParticipantId,
    },

    #[error("lobby {0} is full")]
    LobbyFull(String),

    /// A live lobby already holds this code.
    #[error("lobby {0} already exists")]
    AlreadyExists(String),

    /// Every draw from the numeric space collided.
    #[error("no free {space} after {attempts} attempts")]
    GenerationExhausted {
        space: &'static str,
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_lobby() {
        assert_eq!(
            LobbyError::LobbyNotFound("12345".to_string()).to_string(),
            "lobby 12345 not found"
        );
        assert_eq!(
            LobbyError::ParticipantNotFound {
                code: "12345".to_string(),
                participant_id: 654321,
            }
            .to_string(),
            "participant 654321 not in lobby 12345"
        );
    }

    #[test]
    fn exhaustion_reports_space_and_attempts() {
        let err = LobbyError::GenerationExhausted {
            space: "lobby code",
            attempts: 32,
        };
        assert_eq!(err.to_string(), "no free lobby code after 32 attempts");
    }
}
