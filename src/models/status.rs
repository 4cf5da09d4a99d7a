// src/models/status.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

pub const UNKNOWN_PROTOCOL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: Ipv4Addr, port: u16) -> Self {
        Self { host, port }
    }

    /// The `host:port` label used in rendered messages.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One normalized query result. Built fresh per poll, discarded after
/// rendering. The shape is always complete: fields the server did not
/// report carry their documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub hostname: String,
    pub map_name: String,
    pub game_type: String,
    pub current_players: u32,
    pub max_players: u32,
    pub ping_ms: u64,
    pub hardcore: u32,
    pub knockout: u32,
    pub friendly_fire: u32,
    pub one_death: u32,
    pub anti_cheat: u32,
    pub pure_mode: u32,
    pub mod_name: String,
    pub password_protected: u32,
    pub protocol: String,
}

/// Merges a raw infostring field map against the default record, so callers
/// never have to probe for missing keys.
pub fn normalize(raw: &HashMap<String, String>, ping_ms: u64) -> StatusRecord {
    let text = |key: &str| raw.get(key).cloned().unwrap_or_default();
    let num = |key: &str| {
        raw.get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    };

    StatusRecord {
        hostname: text("hostname"),
        map_name: text("mapname"),
        game_type: text("gametype"),
        current_players: num("clients"),
        max_players: num("sv_maxclients"),
        ping_ms,
        hardcore: num("hc"),
        knockout: num("kc"),
        friendly_fire: num("ff"),
        one_death: num("od"),
        anti_cheat: num("pb"),
        pure_mode: num("pure"),
        // Servers report the mod slot as "0" when no mod is loaded.
        mod_name: raw.get("mod").cloned().unwrap_or_else(|| "0".to_string()),
        password_protected: num("pswrd"),
        protocol: raw
            .get("protocol")
            .cloned()
            .unwrap_or_else(|| UNKNOWN_PROTOCOL.to_string()),
    }
}
