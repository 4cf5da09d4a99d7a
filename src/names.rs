// src/names.rs
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Expands the short map/gametype codes a server reports into display names.
pub trait NameLookup: Send + Sync {
    fn long_map_name(&self, code: &str) -> String;
    fn long_game_type(&self, code: &str) -> String;
}

lazy_static! {
    static ref MAP_NAMES: HashMap<&'static str, &'static str> = {
        let mut names = HashMap::new();
        names.insert("q3dm0", "Introduction");
        names.insert("q3dm1", "Arena Gate");
        names.insert("q3dm2", "House of Pain");
        names.insert("q3dm3", "Arena of Death");
        names.insert("q3dm4", "The Place of Many Deaths");
        names.insert("q3dm5", "The Forgotten Place");
        names.insert("q3dm6", "The Camping Grounds");
        names.insert("q3dm7", "Temple of Retribution");
        names.insert("q3dm8", "Brimstone Abbey");
        names.insert("q3dm9", "Hero's Keep");
        names.insert("q3dm10", "The Nameless Place");
        names.insert("q3dm11", "Deva Station");
        names.insert("q3dm12", "The Dredwerkz");
        names.insert("q3dm13", "Lost World");
        names.insert("q3dm14", "Grim Dungeons");
        names.insert("q3dm15", "Demon Keep");
        names.insert("q3dm16", "Bouncy Map");
        names.insert("q3dm17", "The Longest Yard");
        names.insert("q3dm18", "Space Chamber");
        names.insert("q3dm19", "Apocalypse Void");
        names.insert("q3tourney1", "Power Station 0218");
        names.insert("q3tourney2", "The Proving Grounds");
        names.insert("q3tourney3", "Hell's Gate");
        names.insert("q3tourney4", "Vertical Vengeance");
        names.insert("q3tourney5", "Fatal Instinct");
        names.insert("q3tourney6", "The Very End of You");
        names.insert("q3ctf1", "Dueling Keeps");
        names.insert("q3ctf2", "Troubled Waters");
        names.insert("q3ctf3", "The Stronghold");
        names.insert("q3ctf4", "Space CTF");
        names
    };
    static ref GAME_TYPES: HashMap<&'static str, &'static str> = {
        let mut types = HashMap::new();
        types.insert("0", "Free For All");
        types.insert("1", "Tournament");
        types.insert("2", "Single Player");
        types.insert("3", "Team Deathmatch");
        types.insert("4", "Capture the Flag");
        types.insert("5", "One Flag CTF");
        types.insert("6", "Overload");
        types.insert("7", "Harvester");
        types
    };
}

/// Lookup over the stock Quake3 tables. Unknown codes fall back to the code
/// itself so the rendered message still names the map.
pub struct StaticNames;

impl NameLookup for StaticNames {
    fn long_map_name(&self, code: &str) -> String {
        MAP_NAMES
            .get(code)
            .map(|name| name.to_string())
            .unwrap_or_else(|| code.to_string())
    }

    fn long_game_type(&self, code: &str) -> String {
        GAME_TYPES
            .get(code)
            .map(|name| name.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}
