use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

/// Base URLs of the backend services the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Identity service (auth, user dashboard, vehicles, media).
    #[serde(default = "default_identity_url")]
    pub identity: String,
    /// Workshop service (mechanics, shop, orders).
    #[serde(default = "default_workshop_url")]
    pub workshop: String,
    /// Community service (forum posts, coupons).
    #[serde(default = "default_community_url")]
    pub community: String,
}

/// Request defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// `limit` sent to paginated list endpoints (default: 30).
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

/// Where the session and profile slices survive restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_persistence_enabled")]
    pub enabled: bool,
    /// Storage key; also the file stem of the persisted state.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Explicit file path. Defaults to `<data_dir>/crapi-client/<namespace>.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PersistenceConfig {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => {
                let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
                data_dir
                    .join("crapi-client")
                    .join(format!("{}.json", self.namespace))
            }
        }
    }
}

fn default_identity_url() -> String {
    "http://localhost:8888/identity".to_string()
}

fn default_workshop_url() -> String {
    "http://localhost:8888/workshop".to_string()
}

fn default_community_url() -> String {
    "http://localhost:8888/community".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_limit() -> u32 {
    30
}

fn default_persistence_enabled() -> bool {
    true
}

fn default_namespace() -> String {
    "reducers".to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            identity: default_identity_url(),
            workshop: default_workshop_url(),
            community: default_community_url(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            page_limit: default_page_limit(),
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_persistence_enabled(),
            namespace: default_namespace(),
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig::default(),
            defaults: Defaults::default(),
            persistence: PersistenceConfig::default(),
        }
    }
}
