use super::error::LobbyError;
use super::participant::ParticipantId;
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::warn;

const LOBBY_CODE_RANGE: RangeInclusive<u32> = 10_000..=99_999;
const PARTICIPANT_ID_RANGE: RangeInclusive<ParticipantId> = 100_000..=999_999;

/// Draws per allocation before giving up with `GenerationExhausted`
pub const MAX_GENERATION_ATTEMPTS: u32 = 32;

/// Draw a 5-digit lobby code. Not checked for liveness.
pub fn generate_lobby_code() -> String {
    rand::rng().random_range(LOBBY_CODE_RANGE).to_string()
}

/// Draw a 6-digit participant id. Not checked against any roster.
pub fn generate_participant_id() -> ParticipantId {
    rand::rng().random_range(PARTICIPANT_ID_RANGE)
}

/// Draw lobby codes until `taken` rejects none, at most
/// [`MAX_GENERATION_ATTEMPTS`] times.
pub fn generate_unique_lobby_code<F>(mut taken: F) -> Result<String, LobbyError>
where
    F: FnMut(&str) -> bool,
{
    draw_unique("lobby code", generate_lobby_code, |code| taken(code.as_str()))
}

/// Draw participant ids until one is free within the target roster.
pub fn generate_unique_participant_id<F>(taken: F) -> Result<ParticipantId, LobbyError>
where
    F: FnMut(&ParticipantId) -> bool,
{
    draw_unique("participant id", generate_participant_id, taken)
}

fn draw_unique<T, D, F>(space: &'static str, mut draw: D, mut taken: F) -> Result<T, LobbyError>
where
    D: FnMut() -> T,
    F: FnMut(&T) -> bool,
{
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let candidate = draw();
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    warn!(
        space,
        attempts = MAX_GENERATION_ATTEMPTS,
        "Identifier space saturated"
    );
    Err(LobbyError::GenerationExhausted {
        space,
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}
