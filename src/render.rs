// src/render.rs
use std::sync::Arc;

use crate::models::status::StatusRecord;
use crate::names::NameLookup;

/// Fills the configured templates with status fields. Substitution is a
/// single left-to-right pass: substituted values are never rescanned, so a
/// server name containing placeholder-like text survives verbatim.
pub struct MessageRenderer {
    status_template: String,
    offline_template: String,
    names: Arc<dyn NameLookup>,
}

impl MessageRenderer {
    pub fn new(
        status_template: String,
        offline_template: String,
        names: Arc<dyn NameLookup>,
    ) -> Self {
        Self {
            status_template,
            offline_template,
            names,
        }
    }

    pub fn render_status(&self, record: &StatusRecord, endpoint_label: &str) -> String {
        let map_name = self.names.long_map_name(&record.map_name);
        let game_type = self.names.long_game_type(&record.game_type);
        let max_players = record.max_players.to_string();
        let current_players = record.current_players.to_string();
        let ping = record.ping_ms.to_string();

        substitute(
            &self.status_template,
            &[
                ("<SERVERNAME>", record.hostname.as_str()),
                ("<MAX_PLAYERS>", max_players.as_str()),
                ("<CURRENT_PLAYERS>", current_players.as_str()),
                ("<IP>", endpoint_label),
                ("<MAPNAME>", map_name.as_str()),
                ("<GAMETYPE>", game_type.as_str()),
                ("<PING>", ping.as_str()),
            ],
        )
    }

    pub fn render_offline(&self, endpoint_label: &str) -> String {
        substitute(&self.offline_template, &[("<IP>", endpoint_label)])
    }
}

fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while !rest.is_empty() {
        let mut earliest: Option<(usize, &str, &str)> = None;
        for &(token, value) in replacements {
            if let Some(pos) = rest.find(token) {
                if earliest.map_or(true, |(found, _, _)| pos < found) {
                    earliest = Some((pos, token, value));
                }
            }
        }
        match earliest {
            Some((pos, token, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + token.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::StaticNames;
    use std::collections::HashMap;

    fn renderer(status: &str, offline: &str) -> MessageRenderer {
        MessageRenderer::new(status.to_string(), offline.to_string(), Arc::new(StaticNames))
    }

    fn record() -> StatusRecord {
        let raw: HashMap<String, String> = [
            ("hostname", "Arena"),
            ("mapname", "q3dm17"),
            ("gametype", "0"),
            ("clients", "3"),
            ("sv_maxclients", "16"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        crate::models::status::normalize(&raw, 25)
    }

    #[test]
    fn status_message_has_no_residual_tokens() {
        let renderer = renderer(
            "<IP> <SERVERNAME> => Players: <CURRENT_PLAYERS>/<MAX_PLAYERS> Map: <MAPNAME> (<GAMETYPE>) <PING>ms",
            "<IP> is OFFLINE",
        );
        let message = renderer.render_status(&record(), "10.0.0.1:27960");
        assert_eq!(
            message,
            "10.0.0.1:27960 Arena => Players: 3/16 Map: The Longest Yard (Free For All) 25ms"
        );
        assert!(!message.contains('<'));
    }

    #[test]
    fn offline_message_contains_label_and_no_tokens() {
        let renderer = renderer("<SERVERNAME>", "<IP> is OFFLINE");
        let message = renderer.render_offline("10.0.0.1:27960");
        assert_eq!(message, "10.0.0.1:27960 is OFFLINE");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let renderer = renderer("<SERVERNAME> on <MAPNAME>", "<IP>");
        let mut tricky = record();
        tricky.hostname = "<MAPNAME> trap".to_string();
        let message = renderer.render_status(&tricky, "10.0.0.1:27960");
        assert_eq!(message, "<MAPNAME> trap on The Longest Yard");
    }

    #[test]
    fn rendering_is_idempotent() {
        let renderer = renderer(
            "<SERVERNAME> <CURRENT_PLAYERS>/<MAX_PLAYERS>",
            "<IP> is OFFLINE",
        );
        let record = record();
        let first = renderer.render_status(&record, "10.0.0.1:27960");
        let second = renderer.render_status(&record, "10.0.0.1:27960");
        assert_eq!(first, second);
    }

    #[test]
    fn template_without_tokens_passes_through() {
        let renderer = renderer("static text", "also static");
        assert_eq!(renderer.render_status(&record(), "x"), "static text");
        assert_eq!(renderer.render_offline("x"), "also static");
    }
}
