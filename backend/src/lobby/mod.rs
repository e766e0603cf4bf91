mod code;
mod error;
mod manager;
mod model;
mod participant;
mod reaper;
mod registry;

pub use code::{MAX_GENERATION_ATTEMPTS, generate_lobby_code, generate_participant_id};
pub use error::LobbyError;
pub use manager::{LobbyManager, Membership};
pub use model::{Departure, Lobby, LobbyView, MAX_PARTICIPANTS, Phase};
pub use participant::{Participant, ParticipantId};
pub use reaper::{DEFAULT_LOBBY_TTL, DEFAULT_SWEEP_INTERVAL, Reaper};
pub use registry::LobbyRegistry;
