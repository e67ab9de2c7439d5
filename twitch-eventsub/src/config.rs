use std::{env, path::PathBuf};

use serde::Deserialize;
use twitch_api::error::{ApiError, Result};

fn load_toml<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    use serde::de::Error as _;
    let config = std::fs::read_to_string(path)
        .map_err(toml::de::Error::custom)
        .map_err(ApiError::LoadConfig)?;
    toml::from_str(&config).map_err(ApiError::LoadConfig)
}

/// Controller-level configuration: where to connect and how many Sessions to
/// fan subscriptions across.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    pub user_agent: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Server-advertised per-connection subscription cap; sessions at or
    /// above this count are excluded from placement.
    #[serde(default = "default_max_subscriptions_per_session")]
    pub max_subscriptions_per_session: usize,
}

fn default_host() -> String {
    "eventsub.wss.twitch.tv".to_owned()
}

fn default_port() -> u16 {
    443
}

fn default_path() -> String {
    "/ws".to_owned()
}

fn default_max_sessions() -> usize {
    8
}

fn default_max_subscriptions_per_session() -> usize {
    100
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("twitch-eventsub/", env!("CARGO_PKG_VERSION")).to_owned(),
            host: default_host(),
            port: default_port(),
            path: default_path(),
            max_sessions: default_max_sessions(),
            max_subscriptions_per_session: default_max_subscriptions_per_session(),
        }
    }
}

impl ControllerConfig {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        load_toml(path)
    }

    pub fn load_from_env() -> Result<Self> {
        Self::load(&from_env())
    }
}

fn from_env() -> PathBuf {
    env::var_os("TWITCH_EVENTSUB_CONFIG")
        .unwrap_or_else(|| "eventsub-config.toml".into())
        .into()
}
