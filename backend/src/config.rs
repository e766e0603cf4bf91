use crate::lobby::{DEFAULT_LOBBY_TTL, DEFAULT_SWEEP_INTERVAL};
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub port: u16,
    pub lobby_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Missing, unparseable or zero
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            lobby_ttl: secs("LOBBY_TTL_SECS").unwrap_or(DEFAULT_LOBBY_TTL),
            sweep_interval: secs("REAPER_INTERVAL_SECS").unwrap_or(DEFAULT_SWEEP_INTERVAL),
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
