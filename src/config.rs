// src/config.rs
use log::error;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MESSAGE: &str = "^1<IP> ^7<SERVERNAME> ^7 => Players: ^2<CURRENT_PLAYERS>/<MAX_PLAYERS> ^7 Map: ^2<MAPNAME> (<GAMETYPE>)";
pub const DEFAULT_OFFLINE: &str = "<IP> ^7is ^1OFFLINE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enabled: bool,
    pub servers: Vec<String>,
    pub message: String,
    pub offline: String,
    pub interval_secs: u64,
    pub query_timeout_secs: u64,
    pub rcon_address: String,
    pub rcon_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: false,
            servers: Vec::new(),
            message: DEFAULT_MESSAGE.to_string(),
            offline: DEFAULT_OFFLINE.to_string(),
            interval_secs: 300, // 5 minutes
            query_timeout_secs: 2,
            rcon_address: "127.0.0.1:27960".to_string(),
            rcon_password: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "failed to read config file: {}", e),
            Self::Parse(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("SERVERINFO_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),

            servers: env::var("SERVERINFO_SERVERS")
                .map(|v| {
                    v.split(',')
                        .map(|entry| entry.trim().to_string())
                        .filter(|entry| !entry.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            message: env::var("SERVERINFO_MESSAGE").unwrap_or_else(|_| DEFAULT_MESSAGE.to_string()),

            offline: env::var("SERVERINFO_OFFLINE").unwrap_or_else(|_| DEFAULT_OFFLINE.to_string()),

            interval_secs: env::var("SERVERINFO_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),

            query_timeout_secs: env::var("SERVERINFO_QUERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),

            rcon_address: env::var("SERVERINFO_RCON_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:27960".to_string()),

            rcon_password: env::var("SERVERINFO_RCON_PASSWORD").unwrap_or_default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
        serde_json::from_str(&raw).map_err(ConfigError::Parse)
    }

    /// Loads from the file named by SERVERINFO_CONFIG when set, falling back
    /// to plain environment variables on any load failure.
    pub fn load() -> Self {
        match env::var("SERVERINFO_CONFIG") {
            Ok(path) => match Self::from_file(Path::new(&path)) {
                Ok(config) => config,
                Err(e) => {
                    error!("{} (falling back to environment): {}", path, e);
                    Self::from_env()
                }
            },
            Err(_) => Self::from_env(),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
