// src/utils.rs
use std::collections::HashMap;

// Every connectionless Quake3 packet starts with this out-of-band marker.
pub const OOB_HEADER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

pub fn oob_packet(command: &str) -> Vec<u8> {
    let mut packet = Vec::with_capacity(OOB_HEADER.len() + command.len());
    packet.extend_from_slice(&OOB_HEADER);
    packet.extend_from_slice(command.as_bytes());
    packet
}

/// Parses a `\key\value\key\value` infostring into a field map.
/// A trailing key without a value is dropped.
pub fn parse_infostring(raw: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut parts = raw.trim_start_matches('\\').split('\\');
    while let (Some(key), Some(value)) = (parts.next(), parts.next()) {
        if !key.is_empty() {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oob_packet_carries_header_and_command() {
        let packet = oob_packet("getstatus");
        assert_eq!(&packet[..4], &OOB_HEADER);
        assert_eq!(&packet[4..], b"getstatus");
    }

    #[test]
    fn parses_infostring_with_leading_backslash() {
        let fields = parse_infostring("\\hostname\\Arena\\mapname\\q3dm17");
        assert_eq!(fields.get("hostname").unwrap(), "Arena");
        assert_eq!(fields.get("mapname").unwrap(), "q3dm17");
    }

    #[test]
    fn drops_trailing_key_without_value() {
        let fields = parse_infostring("\\hostname\\Arena\\dangling");
        assert_eq!(fields.len(), 1);
        assert!(!fields.contains_key("dangling"));
    }

    #[test]
    fn empty_infostring_yields_no_fields() {
        assert!(parse_infostring("").is_empty());
        assert!(parse_infostring("\\").is_empty());
    }
}
