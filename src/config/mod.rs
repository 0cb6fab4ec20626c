//! Configuration module for step-ticker.
//!
//! Provides types for loading and validating tick timing and motor output
//! configuration from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod system;
mod ticker;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use ticker::TickerConfig;
pub use validation::{validate_config, validate_ticker};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Hertz, Microseconds, TimerCounts};
