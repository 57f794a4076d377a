//! Board configuration.
//!
//! # Responsibility
//! - Hold the widget constants (storage key, placeholder, offsets, palette).
//! - Allow hosts to override them from JSON.
//!
//! # Invariants
//! - A normalized config always has a non-empty storage key and palette.

use crate::model::note::Position;
use serde::{Deserialize, Serialize};

/// Storage key the board blob lives under.
pub const DEFAULT_STORAGE_KEY: &str = "stickyNotesData";
/// Text shown on notes created without content.
pub const PLACEHOLDER_CONTENT: &str = "New Note";
/// Pastel background colors picked at random for new notes.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#ffd790", "#ff7171", "#9fffe0", "#ffee93", "#c7ceea", "#bcf5ff",
];
pub const DEFAULT_POSITION: Position = Position::new(20.0, 20.0);
pub const TRIGGER_POSITION: Position = Position::new(30.0, 30.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub storage_key: String,
    pub placeholder: String,
    /// Offset for `create` calls that carry no position.
    pub default_position: Position,
    /// Offset for notes spawned by the add-note control.
    pub trigger_position: Position,
    pub palette: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder: PLACEHOLDER_CONTENT.to_string(),
            default_position: DEFAULT_POSITION,
            trigger_position: TRIGGER_POSITION,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl BoardConfig {
    /// Parses a partial JSON override; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(raw).map(Self::normalized)
    }

    /// Replaces blank required values with defaults.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.storage_key.trim().is_empty() {
            self.storage_key = defaults.storage_key;
        }
        self.palette.retain(|color| !color.trim().is_empty());
        if self.palette.is_empty() {
            self.palette = defaults.palette;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, DEFAULT_STORAGE_KEY};
    use crate::model::note::Position;

    #[test]
    fn defaults_match_widget_constants() {
        let config = BoardConfig::default();
        assert_eq!(config.storage_key, "stickyNotesData");
        assert_eq!(config.placeholder, "New Note");
        assert_eq!(config.default_position, Position::new(20.0, 20.0));
        assert_eq!(config.trigger_position, Position::new(30.0, 30.0));
        assert_eq!(config.palette.len(), 6);
    }

    #[test]
    fn from_json_overrides_only_given_fields() {
        let config =
            BoardConfig::from_json(r##"{"storage_key": "board-2", "palette": ["#000"]}"##).unwrap();
        assert_eq!(config.storage_key, "board-2");
        assert_eq!(config.palette, vec!["#000".to_string()]);
        assert_eq!(config.placeholder, "New Note");
    }

    #[test]
    fn normalized_restores_blank_key_and_empty_palette() {
        let config = BoardConfig::from_json(r#"{"storage_key": " ", "palette": [""]}"#).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.palette.len(), 6);
    }
}
