use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reading-time parameters for informational steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub min_delay_ms: u64,
    pub per_char_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            per_char_ms: 30,
            max_delay_ms: 3000,
        }
    }
}

impl SimulationConfig {
    /// How long an informational message stays up before the chat moves on:
    /// `per_char_ms` per character, clamped to `[min_delay_ms, max_delay_ms]`.
    pub fn display_delay(&self, content: &str) -> Duration {
        let chars = content.chars().count() as u64;
        let ms = self
            .per_char_ms
            .saturating_mul(chars)
            .max(self.min_delay_ms)
            .min(self.max_delay_ms.max(self.min_delay_ms));
        Duration::from_millis(ms)
    }
}
