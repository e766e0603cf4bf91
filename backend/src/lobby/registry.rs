use super::error::LobbyError;
use super::model::Lobby;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

/// Authoritative code -> lobby mapping.
///
/// Every method runs under the lock of the DashMap shard holding the code.
/// That lock serializes all mutations on one code; codes in different shards
/// proceed in parallel, codes sharing a shard briefly wait on each other.
/// A lobby whose roster becomes empty is removed before that lock is
/// released, so no reader ever observes it.
#[derive(Default)]
pub struct LobbyRegistry {
    lobbies: DashMap<String, Lobby>,
}

impl LobbyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `lobby.code`. Fails if a live lobby already holds it.
    pub fn insert(&self, lobby: Lobby) -> Result<(), LobbyError> {
        match self.lobbies.entry(lobby.code.clone()) {
            Entry::Occupied(entry) => Err(LobbyError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(lobby);
                Ok(())
            }
        }
    }

    /// Consistent copy of one lobby
    pub fn lookup(&self, code: &str) -> Result<Lobby, LobbyError> {
        self.lobbies
            .get(code)
            .map(|lobby| lobby.clone())
            .ok_or_else(|| LobbyError::LobbyNotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lobbies.contains_key(code)
    }

    pub fn remove(&self, code: &str) -> Result<Lobby, LobbyError> {
        self.lobbies
            .remove(code)
            .map(|(_, lobby)| lobby)
            .ok_or_else(|| LobbyError::LobbyNotFound(code.to_string()))
    }

    /// Remove `code` only if `predicate` still holds under the lock.
    pub fn remove_if<F>(&self, code: &str, predicate: F) -> Option<Lobby>
    where
        F: FnOnce(&Lobby) -> bool,
    {
        self.lobbies
            .remove_if(code, |_, lobby| predicate(lobby))
            .map(|(_, lobby)| lobby)
    }

    /// Copies of every live lobby. Not atomic across codes.
    pub fn snapshot_all(&self) -> Vec<(String, Lobby)> {
        self.lobbies
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Run `mutate` against one lobby under exclusive access.
    ///
    /// If the lobby ends up with an empty roster it is deleted in the same
    /// critical section.
    pub fn update<R, F>(&self, code: &str, mutate: F) -> Result<R, LobbyError>
    where
        F: FnOnce(&mut Lobby) -> Result<R, LobbyError>,
    {
        let Entry::Occupied(mut entry) = self.lobbies.entry(code.to_string()) else {
            debug!(code, "Update on unknown lobby");
            return Err(LobbyError::LobbyNotFound(code.to_string()));
        };

        let result = mutate(entry.get_mut());

        if entry.get().is_empty() {
            entry.remove();
            info!(code, "Lobby deleted (empty)");
        }

        result
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }
}
