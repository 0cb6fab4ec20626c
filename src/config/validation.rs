//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::ticker::MAX_MOTORS;

use super::{SystemConfig, TickerConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Timer clock is positive
/// - Tick period spans at least one timer count
/// - Unstep delay spans at least one timer count
/// - Motor count fits the unstep bit-set
///
/// A pulse width at or above the tick period is accepted; see
/// [`TickerConfig::pulse_fits_tick`].
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_ticker(&config.ticker)?;

    if config.motor_count() > MAX_MOTORS {
        return Err(Error::Config(ConfigError::TooManyMotors {
            configured: config.motor_count(),
            capacity: MAX_MOTORS,
        }));
    }

    Ok(())
}

/// Validate the timing section alone.
pub fn validate_ticker(config: &TickerConfig) -> Result<()> {
    let clock = config.timer_clock_hz;
    if clock.0.is_nan() || clock.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidTimerClock(clock.0)));
    }

    let frequency = config.frequency_hz;
    if frequency.0.is_nan() || frequency.0 <= 0.0 || frequency.period_counts(clock).0 == 0 {
        return Err(Error::Config(ConfigError::InvalidFrequency(frequency.0)));
    }

    let unstep = config.unstep_time_us;
    if unstep.0.is_nan() || unstep.0 <= 0.0 || unstep.to_counts(clock).0 == 0 {
        return Err(Error::Config(ConfigError::InvalidUnstepTime(unstep.0)));
    }

    #[cfg(feature = "defmt")]
    if !config.pulse_fits_tick() {
        defmt::warn!(
            "unstep time {=f32} us is not below the {=f32} us tick period; pulses will merge",
            unstep.0,
            frequency.period().0
        );
    }

    Ok(())
}
