use super::code::{generate_participant_id, generate_unique_lobby_code, generate_unique_participant_id};
use super::error::LobbyError;
use super::model::{Departure, Lobby, LobbyView};
use super::participant::{Participant, ParticipantId};
use super::registry::LobbyRegistry;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

/// A participant together with the roster it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub code: String,
    pub participant: Participant,
    pub roster: Vec<Participant>,
}

/// Create/join/leave/start operations over a shared registry.
///
/// Each operation executes as one critical section on its lobby code.
pub struct LobbyManager {
    registry: Arc<LobbyRegistry>,
}

impl LobbyManager {
    pub fn new(registry: Arc<LobbyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<LobbyRegistry> {
        &self.registry
    }

    /// Open a new lobby hosted by `display_name`.
    pub fn create_lobby(&self, display_name: impl Into<String>) -> Result<Membership, LobbyError> {
        let host = Participant::host(generate_participant_id(), display_name);
        let created_at = Instant::now();

        // Insertion into a vacant entry is the claim, so two racing creates
        // can never end up sharing a code.
        let code = generate_unique_lobby_code(|code| {
            self.registry
                .insert(Lobby::new(code, host.clone(), created_at))
                .is_err()
        })?;

        info!(code, host = host.display_name, "Lobby created");

        Ok(Membership {
            code,
            roster: vec![host.clone()],
            participant: host,
        })
    }

    /// Add `display_name` to the lobby at `code`.
    pub fn join_lobby(
        &self,
        code: &str,
        display_name: impl Into<String>,
    ) -> Result<Membership, LobbyError> {
        let display_name = display_name.into();

        let membership = self.registry.update(code, |lobby| {
            if lobby.is_full() {
                return Err(LobbyError::LobbyFull(lobby.code.clone()));
            }
            let id = generate_unique_participant_id(|id| lobby.has_participant(*id))?;
            let participant = lobby.admit(Participant::guest(id, display_name))?.clone();
            Ok(Membership {
                code: lobby.code.clone(),
                participant,
                roster: lobby.roster().to_vec(),
            })
        })?;

        info!(
            code,
            participant = membership.participant.display_name,
            size = membership.roster.len(),
            "Participant joined lobby"
        );
        Ok(membership)
    }

    /// Mark the game as started. Repeated calls are no-ops.
    pub fn start_game(&self, code: &str) -> Result<LobbyView, LobbyError> {
        let view = self.registry.update(code, |lobby| {
            lobby.start();
            Ok(lobby.view())
        })?;

        info!(code, "Game starting");
        Ok(view)
    }

    /// Remove a participant; deletes the lobby if nobody is left.
    pub fn leave_lobby(
        &self,
        code: &str,
        participant_id: ParticipantId,
    ) -> Result<Departure, LobbyError> {
        let departure = self
            .registry
            .update(code, |lobby| lobby.remove_participant(participant_id))?;

        if let Some(new_host) = departure.new_host {
            debug!(code, new_host, "Host transferred");
        }
        info!(
            code,
            participant = departure.participant.display_name,
            lobby_closed = departure.lobby_closed,
            "Participant left lobby"
        );
        Ok(departure)
    }

    /// Snapshot for pollers
    pub fn get_lobby_state(&self, code: &str) -> Result<LobbyView, LobbyError> {
        let view = self.registry.lookup(code)?.view();
        debug!(code, size = view.roster.len(), "Lobby state read");
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::model::{MAX_PARTICIPANTS, Phase};

    fn manager() -> LobbyManager {
        LobbyManager::new(Arc::new(LobbyRegistry::new()))
    }

    fn names(roster: &[Participant]) -> Vec<(&str, bool)> {
        roster
            .iter()
            .map(|p| (p.display_name.as_str(), p.is_host))
            .collect()
    }

    #[test]
    fn create_returns_code_and_host() {
        let manager = manager();

        let created = manager.create_lobby("Ann").unwrap();

        assert_eq!(created.code.len(), 5);
        assert!(created.participant.is_host);
        assert_eq!(names(&created.roster), vec![("Ann", true)]);
        assert!(manager.registry().contains(&created.code));
    }

    #[test]
    fn create_gives_distinct_codes() {
        let manager = manager();
        let codes: std::collections::HashSet<String> = (0..200)
            .map(|_| manager.create_lobby("Ann").unwrap().code)
            .collect();

        assert_eq!(codes.len(), 200);
        assert_eq!(manager.registry().len(), 200);
    }

    #[test]
    fn join_appends_guest() {
        let manager = manager();
        let created = manager.create_lobby("Ann").unwrap();

        let joined = manager.join_lobby(&created.code, "Bo").unwrap();

        assert!(!joined.participant.is_host);
        assert_ne!(joined.participant.id, created.participant.id);
        assert_eq!(names(&joined.roster), vec![("Ann", true), ("Bo", false)]);
    }

    #[test]
    fn join_unknown_lobby_fails() {
        let manager = manager();
        assert_eq!(
            manager.join_lobby("99999", "Bo"),
            Err(LobbyError::LobbyNotFound("99999".to_string()))
        );
    }

    #[test]
    fn thirteenth_join_is_rejected() {
        let manager = manager();
        let code = manager.create_lobby("Ann").unwrap().code;

        for i in 1..MAX_PARTICIPANTS {
            manager.join_lobby(&code, format!("p{i}")).unwrap();
        }

        assert_eq!(
            manager.join_lobby(&code, "late"),
            Err(LobbyError::LobbyFull(code.clone()))
        );
        assert_eq!(
            manager.get_lobby_state(&code).unwrap().roster.len(),
            MAX_PARTICIPANTS
        );
    }

    #[test]
    fn participant_ids_are_unique_within_lobby() {
        let manager = manager();
        let code = manager.create_lobby("Ann").unwrap().code;
        for i in 1..MAX_PARTICIPANTS {
            manager.join_lobby(&code, format!("p{i}")).unwrap();
        }

        let roster = manager.get_lobby_state(&code).unwrap().roster;
        let ids: std::collections::HashSet<_> = roster.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn start_game_is_idempotent() {
        let manager = manager();
        let code = manager.create_lobby("Ann").unwrap().code;

        let first = manager.start_game(&code).unwrap();
        let second = manager.start_game(&code).unwrap();

        assert_eq!(first.phase, Phase::Started);
        assert!(first.countdown_started);
        assert_eq!(first, second);
    }

    #[test]
    fn start_unknown_lobby_fails() {
        let manager = manager();
        assert!(matches!(
            manager.start_game("99999"),
            Err(LobbyError::LobbyNotFound(_))
        ));
    }

    #[test]
    fn join_after_start_is_allowed() {
        let manager = manager();
        let code = manager.create_lobby("Ann").unwrap().code;
        manager.start_game(&code).unwrap();

        let joined = manager.join_lobby(&code, "Bo").unwrap();

        assert_eq!(joined.roster.len(), 2);
        assert_eq!(manager.get_lobby_state(&code).unwrap().phase, Phase::Started);
    }

    #[test]
    fn full_scenario_hands_over_host_then_deletes() {
        let manager = manager();
        let ann = manager.create_lobby("Ann").unwrap();
        let code = ann.code.clone();
        let bo = manager.join_lobby(&code, "Bo").unwrap();
        assert_eq!(names(&bo.roster), vec![("Ann", true), ("Bo", false)]);

        let departure = manager.leave_lobby(&code, ann.participant.id).unwrap();
        assert_eq!(departure.new_host, Some(bo.participant.id));
        let state = manager.get_lobby_state(&code).unwrap();
        assert_eq!(names(&state.roster), vec![("Bo", true)]);

        let departure = manager.leave_lobby(&code, bo.participant.id).unwrap();
        assert!(departure.lobby_closed);
        assert_eq!(
            manager.get_lobby_state(&code),
            Err(LobbyError::LobbyNotFound(code.clone()))
        );
        assert!(manager.registry().is_empty());
    }

    #[test]
    fn leave_with_unknown_participant_fails() {
        let manager = manager();
        let code = manager.create_lobby("Ann").unwrap().code;

        assert_eq!(
            manager.leave_lobby(&code, 1),
            Err(LobbyError::ParticipantNotFound {
                code: code.clone(),
                participant_id: 1,
            })
        );
        assert_eq!(manager.get_lobby_state(&code).unwrap().roster.len(), 1);
    }

    #[test]
    fn leave_unknown_lobby_fails() {
        let manager = manager();
        assert_eq!(
            manager.leave_lobby("99999", 123456),
            Err(LobbyError::LobbyNotFound("99999".to_string()))
        );
    }

    #[test]
    fn deleted_lobby_rejects_every_operation() {
        let manager = manager();
        let ann = manager.create_lobby("Ann").unwrap();
        manager.leave_lobby(&ann.code, ann.participant.id).unwrap();

        assert!(manager.join_lobby(&ann.code, "Bo").is_err());
        assert!(manager.start_game(&ann.code).is_err());
        assert!(manager.leave_lobby(&ann.code, ann.participant.id).is_err());
        assert!(manager.get_lobby_state(&ann.code).is_err());
    }

    #[test]
    fn exactly_one_host_while_members_churn() {
        let manager = manager();
        let code = manager.create_lobby("p0").unwrap().code;
        for i in 1..6 {
            manager.join_lobby(&code, format!("p{i}")).unwrap();
        }

        loop {
            let Ok(state) = manager.get_lobby_state(&code) else {
                break;
            };
            assert_eq!(state.roster.iter().filter(|p| p.is_host).count(), 1);
            // Alternate removing the host and the newest member
            let victim = if state.roster.len() % 2 == 0 {
                state.roster.iter().find(|p| p.is_host).unwrap().id
            } else {
                state.roster.last().unwrap().id
            };
            manager.leave_lobby(&code, victim).unwrap();
        }

        assert!(!manager.registry().contains(&code));
    }
}
