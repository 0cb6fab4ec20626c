//! Motor output configuration from TOML.

use serde::Deserialize;

/// Electrical polarity of one motor's STEP/DIR outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct MotorConfig {
    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Step pulses are active-low.
    #[serde(default)]
    pub invert_step: bool,
}

impl MotorConfig {
    /// Pin level that asserts a step pulse.
    #[inline]
    pub fn step_active_high(&self) -> bool {
        !self.invert_step
    }
}
