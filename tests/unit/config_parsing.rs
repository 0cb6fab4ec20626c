//! Unit tests for TOML configuration parsing.

use step_ticker::config::{load_config, parse_config, SystemConfig};
use step_ticker::Hertz;

/// Test parsing a full ticker and motor configuration from TOML.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[ticker]
frequency_hz = 50000.0
unstep_time_us = 2.5
timer_clock_hz = 84000000.0

[motors.alpha]
invert_direction = true

[motors.beta]
invert_step = true

[motors.gamma]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.ticker.frequency_hz, Hertz(50_000.0));
    assert_eq!(config.ticker.unstep_time_us.value(), 2.5);
    assert_eq!(config.ticker.timer_clock_hz.value(), 84_000_000.0);

    let alpha = config.motor("alpha").expect("Motor not found");
    assert!(alpha.invert_direction);
    assert!(alpha.step_active_high());

    let beta = config.motor("beta").expect("Motor not found");
    assert!(!beta.invert_direction);
    assert!(!beta.step_active_high());

    assert_eq!(config.motor_count(), 3);
}

/// Motor tables keep their declaration order, which becomes registration order.
#[test]
fn test_motor_order_preserved() {
    let toml_str = r#"
[motors.z]
[motors.a]
[motors.m]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let names: Vec<&str> = config.motor_names().collect();
    assert_eq!(names, ["z", "a", "m"]);
}

/// Test that omitted ticker fields fall back to defaults.
#[test]
fn test_partial_ticker_section() {
    let toml_str = r#"
[ticker]
unstep_time_us = 3.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.ticker.frequency_hz.value(), 100_000.0);
    assert_eq!(config.ticker.unstep_time_us.value(), 3.0);
    assert_eq!(config.ticker.timer_clock_hz.value(), 25_000_000.0);
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("step_ticker_load_config.toml");
    std::fs::write(
        &path,
        r#"
[ticker]
frequency_hz = 40000.0

[motors.x]
"#,
    )
    .expect("Failed to write config file");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.ticker.frequency_hz.value(), 40_000.0);
    assert!(config.motor("x").is_some());

    let _ = std::fs::remove_file(&path);
}

/// Unknown value types are rejected by the parser.
#[test]
fn test_wrong_value_type() {
    let toml_str = r#"
[ticker]
frequency_hz = "fast"
"#;

    assert!(parse_config(toml_str).is_err());
}
