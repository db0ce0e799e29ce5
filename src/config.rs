//! Region configuration persistence
//!
//! Stores user preferences in `~/.config/landmark/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::region::Markers;

/// Region settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Parse regions and tags at all
    pub enabled: bool,
    pub start_region: String,
    pub end_region: String,
    pub tag: String,
    /// Treat markers as literal text instead of regex fragments
    pub escape_markers: bool,
    /// Produce key/name/description decorations
    pub highlight: bool,
    /// Initial collapse depth of the outline (0 = fully expanded)
    pub default_max_depth: usize,
    /// Symbol kinds the outline hides
    pub hidden_item: Vec<String>,
    /// Minimum interval between handled arrow-key presses in the outline
    pub nav_throttle_ms: u64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        let markers = Markers::default();
        Self {
            enabled: true,
            start_region: markers.start,
            end_region: markers.end,
            tag: markers.tag,
            escape_markers: false,
            highlight: true,
            default_max_depth: 0,
            hidden_item: Vec::new(),
            nav_throttle_ms: 100,
        }
    }
}

impl RegionConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Markers built from the configured strings
    pub fn markers(&self) -> Markers {
        let markers = Markers::new(&self.start_region, &self.end_region, &self.tag);
        if self.escape_markers {
            markers.escaped()
        } else {
            markers
        }
    }

    /// Whether the outline should list symbols of `kind`
    pub fn is_visible(&self, kind: &str) -> bool {
        !self.hidden_item.iter().any(|hidden| hidden == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: RegionConfig = serde_yaml::from_str("tag: \"@mark\"\n").unwrap();
        assert_eq!(config.tag, "@mark");
        assert_eq!(config.start_region, "#region");
        assert!(config.enabled);
        assert_eq!(config.nav_throttle_ms, 100);
    }

    #[test]
    fn test_markers_respect_escape_flag() {
        let mut config = RegionConfig {
            start_region: "#(".to_string(),
            ..RegionConfig::default()
        };
        assert!(!config.markers().escape);
        config.escape_markers = true;
        assert!(config.markers().escape);
        assert_eq!(config.markers().start, "#(");
    }

    #[test]
    fn test_hidden_items() {
        let config = RegionConfig {
            hidden_item: vec!["Tag".to_string()],
            ..RegionConfig::default()
        };
        assert!(!config.is_visible("Tag"));
        assert!(config.is_visible("Region"));
    }
}
