//! Player configuration
//!
//! Everything is read from environment variables (after `dotenvy` has loaded
//! `.env.local` / `.env` in the binary). Parsing goes through a lookup closure
//! so tests never touch the process environment.

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const API_URL_VAR: &str = "NANOTOUR_API_URL";
pub const LOBBY_COUNTDOWN_VAR: &str = "NANOTOUR_LOBBY_COUNTDOWN_MS";
pub const WAITING_FALLBACK_VAR: &str = "NANOTOUR_WAITING_FALLBACK_MS";
pub const BATTLE_FALLBACK_VAR: &str = "NANOTOUR_BATTLE_FALLBACK_MS";
pub const HTTP_TIMEOUT_VAR: &str = "NANOTOUR_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_LOBBY_COUNTDOWN_MS: u64 = 5_000;
const DEFAULT_WAITING_FALLBACK_MS: u64 = 20_000;
const DEFAULT_BATTLE_FALLBACK_MS: u64 = 30_000;
// Image generation is slow; the backend blocks until the PNG is rendered.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("{var} must use http or https, got {scheme}")]
    UnsupportedScheme { var: &'static str, scheme: String },

    #[error("{var} must be a whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Local timer lengths driving the session screen's fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    pub lobby_countdown: Duration,
    pub waiting_fallback: Duration,
    pub battle_fallback: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            lobby_countdown: Duration::from_millis(DEFAULT_LOBBY_COUNTDOWN_MS),
            waiting_fallback: Duration::from_millis(DEFAULT_WAITING_FALLBACK_MS),
            battle_fallback: Duration::from_millis(DEFAULT_BATTLE_FALLBACK_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// REST base URL as configured
    pub api_base_url: Url,
    pub http_timeout: Duration,
    pub timings: SessionTimings,
}

impl PlayerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_url = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_api_url(&raw_url)?;

        let millis = |var: &'static str, default: u64| -> Result<Duration, ConfigError> {
            parse_u64(var, read(var), default).map(Duration::from_millis)
        };

        Ok(Self {
            api_base_url,
            http_timeout: Duration::from_secs(parse_u64(
                HTTP_TIMEOUT_VAR,
                read(HTTP_TIMEOUT_VAR),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            timings: SessionTimings {
                lobby_countdown: millis(LOBBY_COUNTDOWN_VAR, DEFAULT_LOBBY_COUNTDOWN_MS)?,
                waiting_fallback: millis(WAITING_FALLBACK_VAR, DEFAULT_WAITING_FALLBACK_MS)?,
                battle_fallback: millis(BATTLE_FALLBACK_VAR, DEFAULT_BATTLE_FALLBACK_MS)?,
            },
        })
    }

    /// REST base as a string without trailing slash, ready for `format!`
    pub fn api_base(&self) -> String {
        self.api_base_url.as_str().trim_end_matches('/').to_string()
    }

    /// WebSocket base derived from the REST base (`http` → `ws`, `https` → `wss`)
    pub fn ws_base_url(&self) -> Url {
        let mut ws = self.api_base_url.clone();
        let scheme = if ws.scheme() == "https" { "wss" } else { "ws" };
        // http(s) → ws(s) is always a permitted scheme change for special URLs
        let _ = ws.set_scheme(scheme);
        ws
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var: API_URL_VAR,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            var: API_URL_VAR,
            scheme: other.to_string(),
        }),
    }
}

fn parse_u64(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = PlayerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base(), "http://localhost:8000");
        assert_eq!(config.timings, SessionTimings::default());
        assert_eq!(config.http_timeout, Duration::from_secs(60));
    }

    #[test]
    fn ws_url_follows_scheme() {
        let config =
            PlayerConfig::from_lookup(lookup(&[(API_URL_VAR, "https://api.example.com/")]))
                .unwrap();
        assert_eq!(config.ws_base_url().scheme(), "wss");
        assert_eq!(config.api_base(), "https://api.example.com");

        let local = PlayerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(local.ws_base_url().as_str(), "ws://localhost:8000/");
    }

    #[test]
    fn timings_are_read_in_millis() {
        let config = PlayerConfig::from_lookup(lookup(&[
            (LOBBY_COUNTDOWN_VAR, "1500"),
            (WAITING_FALLBACK_VAR, " 42 "),
        ]))
        .unwrap();
        assert_eq!(config.timings.lobby_countdown, Duration::from_millis(1500));
        assert_eq!(config.timings.waiting_fallback, Duration::from_millis(42));
        assert_eq!(
            config.timings.battle_fallback,
            SessionTimings::default().battle_fallback
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = PlayerConfig::from_lookup(lookup(&[(BATTLE_FALLBACK_VAR, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: BATTLE_FALLBACK_VAR,
                ..
            }
        ));

        let err = PlayerConfig::from_lookup(lookup(&[(API_URL_VAR, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = PlayerConfig::from_lookup(lookup(&[(API_URL_VAR, "ftp://files")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
    }
}
