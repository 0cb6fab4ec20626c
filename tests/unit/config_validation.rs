//! Unit tests for configuration validation.

use step_ticker::config::{validate_config, validate_ticker, SystemConfig, TickerConfig};
use step_ticker::error::{ConfigError, Error};
use step_ticker::{Hertz, Microseconds};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[ticker]
frequency_hz = 100000.0
unstep_time_us = 1.0

[motors.x]
[motors.y]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a negative tick rate.
#[test]
fn test_negative_frequency() {
    let toml_str = r#"
[ticker]
frequency_hz = -100.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidFrequency(_)))
    ));
}

/// Test validation fails when one tick is shorter than one timer count.
#[test]
fn test_frequency_faster_than_clock() {
    let config = TickerConfig {
        frequency_hz: Hertz(2_000_000.0),
        timer_clock_hz: Hertz(1_000_000.0),
        ..TickerConfig::default()
    };
    assert!(matches!(
        validate_ticker(&config),
        Err(Error::Config(ConfigError::InvalidFrequency(_)))
    ));
}

/// Test validation fails for a zero pulse width.
#[test]
fn test_zero_unstep_time() {
    let toml_str = r#"
[ticker]
unstep_time_us = 0.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidUnstepTime(_)))
    ));
}

/// Test validation fails for a zero timer clock.
#[test]
fn test_zero_timer_clock() {
    let config = TickerConfig {
        timer_clock_hz: Hertz(0.0),
        ..TickerConfig::default()
    };
    assert!(matches!(
        validate_ticker(&config),
        Err(Error::Config(ConfigError::InvalidTimerClock(_)))
    ));
}

/// A pulse wider than the tick period is allowed but reported by `pulse_fits_tick`.
#[test]
fn test_wide_pulse_flagged_not_rejected() {
    let config = TickerConfig {
        frequency_hz: Hertz(100_000.0),
        unstep_time_us: Microseconds(15.0),
        ..TickerConfig::default()
    };
    assert!(validate_ticker(&config).is_ok());
    assert!(!config.pulse_fits_tick());

    assert!(TickerConfig::default().pulse_fits_tick());
}
