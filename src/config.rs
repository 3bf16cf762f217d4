use crate::error::ConfigError;
use crate::flow::DEFAULT_SLOT;
use crate::graph::LayoutConfig;
use crate::simulation::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Editor-wide settings. Every field has a default, so a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Storage slot the flow is persisted under.
    pub storage_key: String,
    pub layout: LayoutConfig,
    pub simulation: SimulationConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_SLOT.to_string(),
            layout: LayoutConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load the configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LayoutDirection;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = EditorConfig::from_json(
            r#"{ "layout": { "direction": "TB", "rankSep": 60 }, "simulation": { "maxDelayMs": 2000 } }"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "chatbot-flow");
        assert_eq!(config.layout.direction, LayoutDirection::TopToBottom);
        assert_eq!(config.layout.rank_sep, 60.0);
        assert_eq!(config.layout.node_width, 300.0);
        assert_eq!(config.simulation.max_delay_ms, 2000);
        assert_eq!(config.simulation.min_delay_ms, 1000);
    }
}
