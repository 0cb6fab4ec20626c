//! Tick engine timing configuration.

use serde::Deserialize;

use super::units::{Hertz, Microseconds};

/// Timing parameters for the tick engine and the unstep timer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TickerConfig {
    /// Rate of the step tick interrupt.
    #[serde(default = "default_frequency")]
    pub frequency_hz: Hertz,

    /// Step pulse width: delay between the last step and the unstep interrupt.
    #[serde(default = "default_unstep_time")]
    pub unstep_time_us: Microseconds,

    /// Rate at which the hardware timers count (e.g. core clock / 4).
    #[serde(default = "default_timer_clock")]
    pub timer_clock_hz: Hertz,
}

fn default_frequency() -> Hertz {
    Hertz(100_000.0)
}

fn default_unstep_time() -> Microseconds {
    Microseconds(1.0)
}

fn default_timer_clock() -> Hertz {
    Hertz(25_000_000.0)
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency(),
            unstep_time_us: default_unstep_time(),
            timer_clock_hz: default_timer_clock(),
        }
    }
}

impl TickerConfig {
    /// Whether the step pulse ends before the next tick can start another one.
    ///
    /// Every step re-arms one shared unstep countdown. With a pulse width at or
    /// above the tick period, a pin stepped on consecutive ticks stays asserted
    /// until the last re-arm expires, and pins stepped on different ticks are
    /// released together. Keep the pulse well below one tick period.
    pub fn pulse_fits_tick(&self) -> bool {
        self.unstep_time_us.0 < self.frequency_hz.period().0
    }
}
