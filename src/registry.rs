// src/registry.rs
use log::warn;
use std::net::Ipv4Addr;

use crate::models::status::Endpoint;

/// Parses configured `"host:port"` entries into endpoints, preserving input
/// order. Entries that do not split into exactly host and port are skipped
/// with a warning; entries whose host is not a valid IPv4 address (or whose
/// port does not fit a u16) are skipped silently.
pub fn parse_endpoints(raw_entries: &[String]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    for entry in raw_entries {
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() != 2 {
            warn!("invalid server entry (expected host:port): {}", entry);
            continue;
        }
        let host = match parts[0].parse::<Ipv4Addr>() {
            Ok(host) => host,
            Err(_) => continue,
        };
        let port = match parts[1].parse::<u16>() {
            Ok(port) => port,
            Err(_) => continue,
        };
        endpoints.push(Endpoint::new(host, port));
    }
    endpoints
}
