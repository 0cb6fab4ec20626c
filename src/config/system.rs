//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::motor::MotorConfig;
use super::ticker::TickerConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Tick engine timing.
    #[serde(default)]
    pub ticker: TickerConfig,

    /// Named motor outputs, in registration order.
    #[serde(default)]
    pub motors: FnvIndexMap<String<32>, MotorConfig, 8>,
}

impl SystemConfig {
    /// Get a motor configuration by name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// Number of configured motors.
    pub fn motor_count(&self) -> usize {
        self.motors.len()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ticker: TickerConfig::default(),
            motors: FnvIndexMap::new(),
        }
    }
}
