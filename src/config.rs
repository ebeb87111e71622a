//! Runtime configuration.
//!
//! Values come from the environment (optionally a `.env` file loaded by
//! `main`) and are then overridden by command-line flags.

use std::str::FromStr;
use std::time::Duration;

use crate::api::{ApiMode, EnvelopeMode};

/// Base URL used when `TICKETBOX_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const ENV_API_URL: &str = "TICKETBOX_API_URL";
pub const ENV_USE_MOCK: &str = "TICKETBOX_USE_MOCK";
pub const ENV_ENVELOPE: &str = "TICKETBOX_ENVELOPE";
pub const ENV_STORAGE: &str = "TICKETBOX_STORAGE";

/// Where session state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    #[default]
    File,
    Keychain,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "keychain" => Ok(StorageKind::Keychain),
            "memory" => Ok(StorageKind::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl FromStr for EnvelopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unwrap" => Ok(EnvelopeMode::Unwrap),
            "plain" => Ok(EnvelopeMode::Plain),
            other => Err(format!("unknown envelope mode '{}'", other)),
        }
    }
}

/// Settings for `ApiClient`.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub mode: ApiMode,
    pub envelope: EnvelopeMode,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: ApiMode::Live,
            envelope: EnvelopeMode::Unwrap,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageKind,
}

impl Config {
    /// Build a config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unparseable values
    /// are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config.api.base_url = url;
        }

        if let Some(raw) = lookup(ENV_USE_MOCK) {
            match parse_bool(&raw) {
                Some(true) => config.api.mode = ApiMode::Mock,
                Some(false) => {}
                None => log::warn!("Ignoring {}: not a boolean '{}'", ENV_USE_MOCK, raw),
            }
        }

        if let Some(raw) = lookup(ENV_ENVELOPE) {
            match raw.parse::<EnvelopeMode>() {
                Ok(mode) => config.api.envelope = mode,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_ENVELOPE, e),
            }
        }

        if let Some(raw) = lookup(ENV_STORAGE) {
            match raw.parse::<StorageKind>() {
                Ok(kind) => config.storage = kind,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_STORAGE, e),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
