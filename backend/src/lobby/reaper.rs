//! Periodic reclamation of lobbies that outlived their time-to-live.
//!
//! Age is measured from creation only; phase and occupancy are ignored.

use super::registry::LobbyRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_LOBBY_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct Reaper {
    registry: Arc<LobbyRegistry>,
    ttl: Duration,
    interval: Duration,
}

impl Reaper {
    pub fn new(registry: Arc<LobbyRegistry>, ttl: Duration, interval: Duration) -> Self {
        Self {
            registry,
            ttl,
            interval,
        }
    }

    /// One pass over the registry. Returns how many lobbies were removed.
    ///
    /// Expiry is re-checked under each code's lock: a code that was emptied
    /// and handed to a fresh lobby after the snapshot survives.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut reaped = 0;
        for (code, lobby) in self.registry.snapshot_all() {
            if !lobby.is_expired(now, self.ttl) {
                continue;
            }
            let removed = self
                .registry
                .remove_if(&code, |current| current.is_expired(now, self.ttl));
            if let Some(lobby) = removed {
                info!(
                    code,
                    age_secs = lobby.age(now).as_secs(),
                    participants = lobby.roster().len(),
                    "Cleaned up old lobby"
                );
                reaped += 1;
            }
        }
        reaped
    }

    /// Sweep every `interval` until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            ttl_secs = self.ttl.as_secs(),
            interval_secs = self.interval.as_secs(),
            "Starting lobby reaper"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reaped = self.sweep(Instant::now());
                    debug!(reaped, remaining = self.registry.len(), "Reaper sweep finished");
                }
                _ = cancel.cancelled() => break,
            }
        }

        info!("Lobby reaper stopped");
    }

    pub fn spawn(self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
