//! Hero banner configuration
//!
//! The text the backdrop is mounted behind: a title, a subtitle and two
//! navigation links. Loaded from a JSON document at startup; none of it
//! feeds the animation, it only titles the window and the startup banner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One navigation link target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Hero banner text handed to the engine at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroConfig {
    pub title: String,
    pub subtitle: String,
    pub links: Vec<NavLink>,
}

impl HeroConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load, falling back to defaults when the file is absent or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "backdrop".to_string(),
            subtitle: "procedural hero scene".to_string(),
            links: vec![
                NavLink {
                    label: "About".to_string(),
                    href: "/about".to_string(),
                },
                NavLink {
                    label: "Contact".to_string(),
                    href: "/contact".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let config = HeroConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: HeroConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn parses_a_hand_written_document() {
        let json = r#"{
            "title": "Member Portal",
            "subtitle": "events, records, community",
            "links": [
                {"label": "Join", "href": "/join"},
                {"label": "Events", "href": "/events"}
            ]
        }"#;
        let config: HeroConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Member Portal");
        assert_eq!(config.links.len(), 2);
        assert_eq!(config.links[1].href, "/events");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = HeroConfig::load_or_default("/nonexistent/hero.json");
        assert_eq!(config, HeroConfig::default());
    }
}
