//! Static client configuration: display lookup tables, map regions, and the
//! names of the bridge functions on both sides.
//!
//! ## Versioning
//!
//! - `CONFIG_VERSION`: the format this build writes its defaults for.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still accepted. Missing fields are
//!   filled with defaults (`#[serde(default)]`), so adding a field does not
//!   bump this value.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::console;
use crate::map::MapRegion;

/// Embedded at compile time; the page never fetches configuration.
const EMBEDDED_CONFIG: &str = include_str!("../assets/client.json");

const CONFIG_VERSION: u32 = 1;
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Icon and color used to present one item or skill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayStyle {
    pub icon: String,
    pub color: String,
}

impl DisplayStyle {
    pub fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Immutable name → style table. Lookups are exact-match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DisplayTable {
    entries: HashMap<String, DisplayStyle>,
}

impl DisplayTable {
    pub fn resolve(&self, name: &str) -> Option<&DisplayStyle> {
        self.entries.get(name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, DisplayStyle)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(name, style)| (name.to_string(), style.clone()))
                .collect(),
        }
    }
}

/// Backend function names the client calls through the Eel bridge. The
/// inbound names are fixed; see `inbound::handlers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeNames {
    /// Player command text.
    pub submit_command: String,
    /// Clicked map region name.
    pub submit_map_click: String,
    /// One-shot readiness notification.
    pub client_ready: String,
}

impl Default for BridgeNames {
    fn default() -> Self {
        Self {
            submit_command: "process_player_command_py".into(),
            submit_map_click: "handle_map_click_py".into(),
            client_ready: "js_ready".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub version: u32,
    pub items: DisplayTable,
    pub skills: DisplayTable,
    pub map_regions: Vec<MapRegion>,
    pub bridge: BridgeNames,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            items: DisplayTable::default(),
            skills: DisplayTable::default(),
            map_regions: Vec::new(),
            bridge: BridgeNames::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Incompatible { found: u32, min: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse failed: {e}"),
            ConfigError::Incompatible { found, min } => {
                write!(f, "config version {found} is older than {min}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Incompatible { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

pub fn parse(json: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = serde_json::from_str(json)?;
    if config.version < MIN_COMPATIBLE_VERSION {
        return Err(ConfigError::Incompatible {
            found: config.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    Ok(config)
}

/// Parse the embedded configuration, falling back to defaults on error.
pub fn load_embedded() -> ClientConfig {
    match parse(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            console::error(&format!("{e}; using built-in defaults"));
            ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = parse(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.map_regions.len(), 3);
        assert_eq!(config.map_regions[0].name, "The Old Well");
        assert!(config.items.resolve("Health Potion").is_some());
        assert!(config.skills.resolve("Fireball").is_some());
        assert_eq!(config.bridge, BridgeNames::default());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(config.items.len(), 0);
        assert!(config.map_regions.is_empty());
        assert_eq!(config.bridge.client_ready, "js_ready");
    }

    #[test]
    fn partial_bridge_section_keeps_other_defaults() {
        let config =
            parse(r#"{ "version": 1, "bridge": { "client_ready": "client_up" } }"#).unwrap();
        assert_eq!(config.bridge.client_ready, "client_up");
        assert_eq!(config.bridge.submit_command, "process_player_command_py");
    }

    #[test]
    fn old_version_rejected() {
        let err = parse(r#"{ "version": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Incompatible { found: 0, min: 1 }));
    }

    #[test]
    fn broken_json_reports_parse_error() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse failed"));
    }

    #[test]
    fn lookup_is_exact_match() {
        let table = DisplayTable::from_pairs(&[("Key", DisplayStyle::new("K", "#fff"))]);
        assert!(table.resolve("Key").is_some());
        assert!(table.resolve("key").is_none());
        assert!(table.resolve("Key ").is_none());
    }
}
