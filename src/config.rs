//! Configuration loading for hostdesk.
//! Reads hostdesk.toml from the current directory or the path in HOSTDESK_CONFIG.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV: &str = "HOSTDESK_CONFIG";
const API_URL_ENV: &str = "HOSTDESK_API_URL";
const DEFAULT_CONFIG_FILE: &str = "hostdesk.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub restaurant: RestaurantConfig,
    #[serde(default)]
    pub bookings: BookingsConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub login: LoginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantConfig {
    #[serde(default = "default_restaurant_id")]
    pub id: i64,
    #[serde(default = "default_hostess_options")]
    pub hostess_options: Vec<String>,
}

fn default_restaurant_id() -> i64 { 1 }

fn default_hostess_options() -> Vec<String> {
    ["Anna", "Maria", "Alexey", "Irina", "Dmitry"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            id: default_restaurant_id(),
            hostess_options: default_hostess_options(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Slots with at least this many bookings are highlighted as busy.
    #[serde(default = "default_busy_threshold")]
    pub busy_threshold: u32,
    #[serde(default = "default_tag_options")]
    pub tag_options: Vec<String>,
}

fn default_refresh_interval() -> u64 { 15 }
fn default_busy_threshold() -> u32 { 5 }

fn default_tag_options() -> Vec<String> {
    ["Parking", "Family", "Vegetarian", "VIP"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for BookingsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            busy_threshold: default_busy_threshold(),
            tag_options: default_tag_options(),
        }
    }
}

impl BookingsConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub assistant_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginConfig {
    pub default_username: Option<String>,
}

impl Config {
    /// Loads the config file if present, falling back to defaults when it is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::warn!(
                "config file {} not found, using defaults",
                path.display()
            );
            Self::default()
        };

        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.api.base_url = base_url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn assistant_id(&self) -> Option<&str> {
        self.assistant
            .assistant_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
